//! Tag cache with merge semantics
//!
//! The remote API does not always return every tag of an item (its own caching
//! can hand out stale or partial lists). This cache remembers every tag seen for
//! an item and merges new answers into that knowledge instead of replacing it.

use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

use crate::types::ItemId;

/// A tag attached to an item
///
/// Identity is `(id, tag)`. The confidence is vote metadata that changes over
/// time; two tags with the same identity but different confidence are equal,
/// and a merge keeps the newer one.
///
/// Trade-off: a confidence-only change is not a distinct tag, so a merge never
/// holds the same tag twice, but equality cannot tell a re-voted tag from an
/// unchanged one. Compare `confidence` explicitly when that matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub tag: String,
    pub confidence: f32,
}

impl Tag {
    #[must_use]
    pub fn new(id: i64, tag: impl Into<String>, confidence: f32) -> Self {
        Self {
            id,
            tag: tag.into(),
            confidence,
        }
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.tag == other.tag
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.tag.hash(state);
    }
}

/// Per-item tag knowledge with a sliding idle expiry
#[derive(Clone, Debug)]
pub struct TagCache {
    cache: Cache<ItemId, Arc<[Tag]>>,
}

impl TagCache {
    /// Create a tag cache
    ///
    /// # Arguments
    /// * `max_capacity` - Maximum number of items to remember tags for
    /// * `idle` - Entries expire after this long without being touched
    ///
    /// The capacity bound is enforced by moka's size-based eviction and
    /// admission policy: once full, an entry still inside its idle window can
    /// be evicted (or a new one refused), which drops the merged knowledge for
    /// that item. The next answer for it is then stored verbatim. Size the
    /// capacity above the number of items a session keeps on screen.
    #[must_use]
    pub fn new(max_capacity: u64, idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(idle)
            .build();
        Self { cache }
    }

    /// Merge `incoming` into the known tags of `item_id` and return the result
    ///
    /// - nothing cached: `incoming` is stored and returned as given
    /// - `incoming` empty: the cached list is returned untouched
    /// - otherwise: cached tags not mentioned by `incoming` (in cached order),
    ///   followed by the incoming tags
    ///
    /// Every call refreshes the idle timer of the entry. The read and the
    /// write are two separate cache operations: concurrent calls for the same
    /// item can lose one of the updates.
    pub fn enhance<I>(&self, item_id: ItemId, incoming: I) -> Arc<[Tag]>
    where
        I: IntoIterator<Item = Tag>,
    {
        let incoming: Vec<Tag> = incoming.into_iter().collect();

        let result = match self.cache.get(&item_id) {
            Some(cached) if incoming.is_empty() => cached,
            Some(cached) => {
                trace!(
                    "Merging {} tags into {} cached for item {}",
                    incoming.len(),
                    cached.len(),
                    item_id
                );
                merge(&cached, incoming)
            }
            None => Arc::from(incoming),
        };

        self.cache.insert(item_id, Arc::clone(&result));
        result
    }

    /// Read the known tags of an item without merging anything
    #[must_use]
    pub fn get(&self, item_id: ItemId) -> Option<Arc<[Tag]>> {
        self.cache.get(&item_id)
    }

    /// Get current cache entry count
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Run pending background tasks (for testing)
    pub fn sync(&self) {
        self.cache.run_pending_tasks();
    }
}

/// Replace cached tags equal to an incoming one, then append the incoming tags
fn merge(cached: &[Tag], incoming: Vec<Tag>) -> Arc<[Tag]> {
    let mut merged: Vec<Tag> = {
        let fresh: HashSet<&Tag> = incoming.iter().collect();
        cached
            .iter()
            .filter(|tag| !fresh.contains(tag))
            .cloned()
            .collect()
    };

    let kept = merged.len();
    for tag in incoming {
        if !merged[kept..].contains(&tag) {
            merged.push(tag);
        }
    }
    Arc::from(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> TagCache {
        TagCache::new(100, Duration::from_secs(300))
    }

    fn names(tags: &[Tag]) -> Vec<&str> {
        tags.iter().map(|t| t.tag.as_str()).collect()
    }

    #[test]
    fn test_tag_equality_ignores_confidence() {
        assert_eq!(Tag::new(1, "cat", 0.1), Tag::new(1, "cat", 0.9));
        assert_ne!(Tag::new(1, "cat", 0.1), Tag::new(2, "cat", 0.1));
        assert_ne!(Tag::new(1, "cat", 0.1), Tag::new(1, "dog", 0.1));

        // re-voted tag is only distinguishable through its confidence
        let before = Tag::new(1, "cat", 0.1);
        let after = Tag::new(1, "cat", 0.9);
        assert!(before == after && before.confidence != after.confidence);
    }

    #[test]
    fn test_first_call_stores_verbatim() {
        let cache = cache();
        let id = ItemId::new(1);
        let result = cache.enhance(id, vec![Tag::new(2, "b", 0.5), Tag::new(1, "a", 0.5)]);
        assert_eq!(names(&result), vec!["b", "a"]);
        assert_eq!(names(&cache.get(id).unwrap()), vec!["b", "a"]);
    }

    #[test]
    fn test_empty_incoming_keeps_cached() {
        let cache = cache();
        let id = ItemId::new(1);
        cache.enhance(id, vec![Tag::new(1, "t1", 0.5), Tag::new(2, "t2", 0.5)]);

        let result = cache.enhance(id, Vec::new());
        assert_eq!(names(&result), vec!["t1", "t2"]);
    }

    #[test]
    fn test_empty_first_call_stores_empty() {
        let cache = cache();
        let id = ItemId::new(3);
        assert!(cache.enhance(id, Vec::new()).is_empty());
        let result = cache.enhance(id, vec![Tag::new(1, "late", 0.1)]);
        assert_eq!(names(&result), vec!["late"]);
    }

    #[test]
    fn test_fresher_tag_replaces_equal_one() {
        let cache = cache();
        let id = ItemId::new(1);
        cache.enhance(id, vec![Tag::new(1, "t1", 0.1), Tag::new(2, "t2", 0.2)]);

        let result = cache.enhance(id, vec![Tag::new(1, "t1", 0.9)]);
        assert_eq!(result.len(), 2);
        assert_eq!(names(&result), vec!["t2", "t1"]);
        let t1 = result.iter().find(|t| t.id == 1).unwrap();
        assert_eq!(t1.confidence, 0.9);
    }

    #[test]
    fn test_merge_keeps_unmentioned_and_adds_new() {
        let cache = cache();
        let id = ItemId::new(1);
        cache.enhance(id, vec![Tag::new(1, "a", 0.1)]);
        let result = cache.enhance(id, vec![Tag::new(2, "b", 0.1), Tag::new(3, "c", 0.1)]);
        assert_eq!(names(&result), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_dedups_incoming() {
        let cache = cache();
        let id = ItemId::new(1);
        cache.enhance(id, vec![Tag::new(1, "a", 0.1)]);
        let result = cache.enhance(
            id,
            vec![Tag::new(2, "b", 0.3), Tag::new(2, "b", 0.7)],
        );
        assert_eq!(names(&result), vec!["a", "b"]);
        assert_eq!(result[1].confidence, 0.3);
    }

    #[test]
    fn test_items_are_independent() {
        let cache = cache();
        cache.enhance(ItemId::new(1), vec![Tag::new(1, "a", 0.1)]);
        cache.enhance(ItemId::new(2), vec![Tag::new(2, "b", 0.1)]);
        assert_eq!(names(&cache.get(ItemId::new(1)).unwrap()), vec!["a"]);
        assert_eq!(names(&cache.get(ItemId::new(2)).unwrap()), vec!["b"]);
        assert!(cache.get(ItemId::new(3)).is_none());
    }

    #[test]
    fn test_capacity_eviction_drops_knowledge() {
        let cache = TagCache::new(1, Duration::from_secs(300));
        for raw in 1..=4 {
            cache.enhance(ItemId::new(raw), vec![Tag::new(raw, "old", 0.1)]);
        }
        cache.sync();
        assert!(cache.entry_count() <= 1);

        // an evicted item starts over from the next answer
        let dropped = (1..=4)
            .map(ItemId::new)
            .find(|id| cache.get(*id).is_none())
            .unwrap();
        let result = cache.enhance(dropped, vec![Tag::new(9, "new", 0.1)]);
        assert_eq!(names(&result), vec!["new"]);
    }

    #[test]
    fn test_entries_expire_when_idle() {
        let cache = TagCache::new(100, Duration::from_millis(50));
        let id = ItemId::new(1);
        cache.enhance(id, vec![Tag::new(1, "a", 0.1)]);
        std::thread::sleep(Duration::from_millis(150));
        assert!(cache.get(id).is_none());

        // Expired knowledge is gone, so the next answer is stored verbatim
        let result = cache.enhance(id, vec![Tag::new(2, "b", 0.1)]);
        assert_eq!(names(&result), vec!["b"]);
    }
}
