//! Repost id set
//!
//! A sorted, duplicate-free array of item ids that only ever grows. Writers
//! serialize on a mutex because the union is a read-merge-write; readers load
//! the last published array through an [`ArcSwap`] without taking any lock, so
//! a lookup never waits for a merge and a merge never waits for readers.

use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use crate::types::{FeedItem, ItemId};

#[derive(Debug)]
pub struct RepostCache {
    /// Last published snapshot
    published: ArcSwap<Vec<ItemId>>,
    /// Serializes `cache_reposts` callers
    writer: Mutex<()>,
}

impl RepostCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            published: ArcSwap::from_pointee(Vec::new()),
            writer: Mutex::new(()),
        }
    }

    /// Add ids to the repost set
    ///
    /// Publishes the sorted union of the previous set and `ids`. Concurrent
    /// callers run one after another, so no update is lost.
    pub fn cache_reposts<I>(&self, ids: I)
    where
        I: IntoIterator<Item = ItemId>,
    {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.snapshot();
        let mut merged: Vec<ItemId> = current.as_ref().clone();
        merged.extend(ids);
        merged.sort_unstable();
        merged.dedup();

        // union is a superset, equal length means nothing new
        if merged.len() == current.len() {
            return;
        }

        debug!(
            "Repost set grew from {} to {} ids",
            current.len(),
            merged.len()
        );
        self.published.store(Arc::new(merged));
    }

    /// Check whether an item is a known repost (O(log n))
    #[must_use]
    pub fn is_repost(&self, item_id: ItemId) -> bool {
        self.published.load().binary_search(&item_id).is_ok()
    }

    #[must_use]
    pub fn is_repost_item(&self, item: &FeedItem) -> bool {
        self.is_repost(item.id)
    }

    /// Last published id array
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<ItemId>> {
        self.published.load_full()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.published.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RepostCache {
    fn default() -> Self {
        Self::new()
    }
}
