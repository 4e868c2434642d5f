//! Windowed feed module
//!
//! This module provides the paging state machine behind a feed surface:
//! - `FeedWindow`: ordered, duplicate-free slice of a remote feed
//! - `FeedProxy`: owner-driven loads, merges and change notification
//! - `WindowSnapshot`: versioned save/restore of a window
//! - `FeedLoader`: the seam to the remote feed API

mod error;
mod listener;
mod loader;
mod memory_loader;
mod proxy;
mod query;
mod snapshot;
mod window;

pub use error::{LoadError, ProxyError, SnapshotError, WindowError};
pub use listener::{ChangeEvent, ChangeListener, ListenerHandle};
pub use loader::{FeedLoader, Page};
pub use memory_loader::{MemoryFeedLoader, synthetic_items};
pub use proxy::{Completion, FeedProxy, LoadRequest, LoadingState};
pub use query::{Cursor, Direction, FeedQuery, FeedType};
pub use snapshot::WindowSnapshot;
pub use window::{EdgeState, FeedWindow, Insertion};
