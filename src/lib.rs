//! Windowed feed paging with a shared enrichment cache
//!
//! A [`FeedProxy`] holds the materialized part of a newest-first remote feed
//! and grows it in both directions through a [`FeedLoader`]. The
//! [`EnrichmentCache`] keeps tags, repost ids and user profiles that feed
//! surfaces attach to items.

#[cfg(test)]
#[macro_use]
mod test_macros;

pub mod args;
pub mod cache;
pub mod config;
pub mod constants;
pub mod feed;
pub mod logging;
pub mod types;

pub use args::DemoArgs;
pub use cache::{CacheStats, EnrichmentCache, Tag};
pub use config::{
    CacheConfig, Config, ConfigSource, WindowConfig, create_default_config, load_config,
    load_config_with_fallback,
};
pub use feed::{
    ChangeListener, Direction, FeedLoader, FeedProxy, FeedQuery, FeedType, LoadError,
    LoadRequest, MemoryFeedLoader, Page, ProxyError, SnapshotError, WindowSnapshot,
};
pub use types::{ContentType, ContentTypes, FeedItem, ItemId};
