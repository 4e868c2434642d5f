//! Short-lived user info cache
//!
//! User profiles are expensive to assemble (profile + uploads + comments) and
//! are requested repeatedly while navigating. Entries live for a fixed time
//! after the write; reading does not extend their life.

use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::types::ContentTypes;

/// Basic public profile of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub mark: i32,
    pub score: i64,
    /// Registration time, unix seconds
    pub registered: i64,
}

/// User profile enriched with counters for the active content filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedUserInfo {
    pub user: UserSummary,
    pub upload_count: u32,
    pub comment_count: u32,
    pub tag_count: u32,
}

/// Cache key: normalized user name plus the content filter signature
type UserKey = (Arc<str>, ContentTypes);

fn normalize(name: &str) -> Arc<str> {
    Arc::from(name.trim().to_lowercase())
}

#[derive(Clone, Debug)]
pub struct UserInfoCache {
    cache: Cache<UserKey, Arc<EnhancedUserInfo>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl UserInfoCache {
    /// Create a user info cache
    ///
    /// # Arguments
    /// * `max_capacity` - Maximum number of profiles to keep
    /// * `ttl` - Lifetime of an entry, counted from its write
    #[must_use]
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self {
            cache,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Store `info` under its user name and the given content filter
    ///
    /// Always overwrites, restarting the entry's lifetime.
    pub fn cache(&self, content_types: ContentTypes, info: EnhancedUserInfo) {
        let key = (normalize(&info.user.name), content_types);
        self.cache.insert(key, Arc::new(info));
    }

    /// Look up a cached profile
    ///
    /// `name` is trimmed and lowercased, so `"Foo "` and `"foo"` hit the same entry.
    #[must_use]
    pub fn get(&self, content_types: ContentTypes, name: &str) -> Option<Arc<EnhancedUserInfo>> {
        let key = (normalize(name), content_types);
        match self.cache.get(&key) {
            Some(info) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(info)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Get current cache entry count
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Get cache hit rate as percentage (0.0 - 100.0)
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits.saturating_add(misses);
        if total != 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Run pending background tasks (for testing)
    pub fn sync(&self) {
        self.cache.run_pending_tasks();
    }
}
