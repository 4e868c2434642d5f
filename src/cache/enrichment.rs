//! Shared enrichment service
//!
//! Construct one `EnrichmentCache` per process and hand out `Arc` clones to
//! every feed surface and display component that needs it.

use std::fmt;
use std::sync::Arc;
use tracing::info;

use super::reposts::RepostCache;
use super::tags::{Tag, TagCache};
use super::user_info::{EnhancedUserInfo, UserInfoCache};
use crate::config::CacheConfig;
use crate::types::{ContentTypes, FeedItem, ItemId};

/// Entry counts of the enrichment caches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub tag_entries: u64,
    pub repost_ids: usize,
    pub user_info_entries: u64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tags={} reposts={} user_infos={}",
            self.tag_entries, self.repost_ids, self.user_info_entries
        )
    }
}

/// Tags, reposts and user infos behind one handle
#[derive(Debug)]
pub struct EnrichmentCache {
    tags: TagCache,
    reposts: RepostCache,
    user_infos: UserInfoCache,
}

impl EnrichmentCache {
    /// Build the caches from configuration
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        info!(
            "Enrichment cache: tags idle {:?} (max {}), user info ttl {:?} (max {})",
            config.tag_idle,
            config.tag_capacity,
            config.user_info_ttl,
            config.user_info_capacity
        );

        Self {
            tags: TagCache::new(config.tag_capacity.get(), config.tag_idle),
            reposts: RepostCache::new(),
            user_infos: UserInfoCache::new(
                config.user_info_capacity.get(),
                config.user_info_ttl,
            ),
        }
    }

    /// Build the caches and wrap them for sharing
    #[must_use]
    pub fn shared(config: &CacheConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    /// Merge tags for an item, see [`TagCache::enhance`]
    pub fn enhance_tags<I>(&self, item_id: ItemId, tags: I) -> Arc<[Tag]>
    where
        I: IntoIterator<Item = Tag>,
    {
        self.tags.enhance(item_id, tags)
    }

    /// Known tags of an item, without merging
    #[must_use]
    pub fn cached_tags(&self, item_id: ItemId) -> Option<Arc<[Tag]>> {
        self.tags.get(item_id)
    }

    pub fn cache_reposts<I>(&self, ids: I)
    where
        I: IntoIterator<Item = ItemId>,
    {
        self.reposts.cache_reposts(ids);
    }

    #[must_use]
    pub fn is_repost(&self, item_id: ItemId) -> bool {
        self.reposts.is_repost(item_id)
    }

    #[must_use]
    pub fn is_repost_item(&self, item: &FeedItem) -> bool {
        self.reposts.is_repost_item(item)
    }

    pub fn cache_user_info(&self, content_types: ContentTypes, info: EnhancedUserInfo) {
        self.user_infos.cache(content_types, info);
    }

    #[must_use]
    pub fn user_info(&self, content_types: ContentTypes, name: &str) -> Option<Arc<EnhancedUserInfo>> {
        self.user_infos.get(content_types, name)
    }

    #[must_use]
    pub fn user_info_hit_rate(&self) -> f64 {
        self.user_infos.hit_rate()
    }

    /// Current entry counts
    ///
    /// moka counts lazily, call [`EnrichmentCache::sync`] first for exact numbers.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            tag_entries: self.tags.entry_count(),
            repost_ids: self.reposts.len(),
            user_info_entries: self.user_infos.entry_count(),
        }
    }

    /// Run pending background tasks (for testing)
    pub fn sync(&self) {
        self.tags.sync();
        self.user_infos.sync();
    }
}

impl Default for EnrichmentCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
