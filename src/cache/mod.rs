//! Enrichment cache module
//!
//! This module provides process-wide, in-memory caches for data the feed
//! surfaces attach to items:
//! - Tag knowledge per item (merged, sliding expiry)
//! - Repost ids (grow-only sorted set)
//! - User profiles (short absolute expiry)

mod enrichment;
mod reposts;
mod tags;
mod user_info;

pub use enrichment::{CacheStats, EnrichmentCache};
pub use reposts::RepostCache;
pub use tags::{Tag, TagCache};
pub use user_info::{EnhancedUserInfo, UserInfoCache, UserSummary};
