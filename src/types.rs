//! Core value types shared by the cache and the feed window
//!
//! This module provides item identities, content classification flags and
//! validated configuration newtypes.

pub mod config;
pub mod content_type;
pub mod item;
pub mod validated;

pub use config::{CacheCapacity, Lookahead, PageSize, duration_serde};
pub use content_type::{ContentType, ContentTypes};
pub use item::{FeedItem, ItemId};
pub use validated::ValidationError;
