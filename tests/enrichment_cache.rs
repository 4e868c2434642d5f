//! Integration tests for the shared enrichment cache

use feed_window::cache::{EnhancedUserInfo, UserSummary};
use feed_window::config::CacheConfig;
use feed_window::types::CacheCapacity;
use feed_window::{ContentType, ContentTypes, EnrichmentCache, ItemId, Tag};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn profile(name: &str, uploads: u32) -> EnhancedUserInfo {
    EnhancedUserInfo {
        user: UserSummary {
            id: 42,
            name: name.to_string(),
            mark: 2,
            score: 1_000,
            registered: 1_300_000_000,
        },
        upload_count: uploads,
        comment_count: 7,
        tag_count: 3,
    }
}

fn names(tags: &[Tag]) -> Vec<&str> {
    tags.iter().map(|t| t.tag.as_str()).collect()
}

#[test]
fn test_tag_merge_keeps_old_knowledge() {
    let cache = EnrichmentCache::default();
    let item = ItemId::new(1);

    let first = cache.enhance_tags(item, [Tag::new(1, "cat", 0.4), Tag::new(2, "dog", 0.1)]);
    assert_eq!(names(&first), vec!["cat", "dog"]);

    // partial answer from the server: dog is missing, cat changed confidence
    let merged = cache.enhance_tags(item, [Tag::new(1, "cat", 0.9), Tag::new(3, "sun", 0.2)]);
    assert_eq!(names(&merged), vec!["dog", "cat", "sun"]);
    assert!((merged[1].confidence - 0.9).abs() < f32::EPSILON);

    // empty answer returns the knowledge unchanged
    let unchanged = cache.enhance_tags(item, Vec::new());
    assert_eq!(names(&unchanged), vec!["dog", "cat", "sun"]);
}

#[test]
fn test_same_tag_with_new_confidence_is_not_duplicated() {
    let cache = EnrichmentCache::default();
    let item = ItemId::new(2);
    cache.enhance_tags(item, [Tag::new(1, "x", 0.5)]);
    let merged = cache.enhance_tags(item, [Tag::new(1, "x", 0.6)]);
    assert_eq!(merged.len(), 1);
}

#[test]
fn test_tags_expire_when_idle() {
    let config = CacheConfig {
        tag_idle: Duration::from_millis(100),
        ..CacheConfig::default()
    };
    let cache = EnrichmentCache::new(&config);
    let item = ItemId::new(3);
    cache.enhance_tags(item, [Tag::new(1, "a", 0.5)]);

    // touching inside the idle window keeps the entry
    for _ in 0..3 {
        thread::sleep(Duration::from_millis(50));
        assert!(cache.cached_tags(item).is_some());
    }

    thread::sleep(Duration::from_millis(200));
    assert!(cache.cached_tags(item).is_none());
}

#[test]
fn test_user_info_lives_for_ttl() {
    let config = CacheConfig {
        user_info_ttl: Duration::from_millis(150),
        user_info_capacity: CacheCapacity::new(10).unwrap(),
        ..CacheConfig::default()
    };
    let cache = EnrichmentCache::new(&config);
    let filter = ContentTypes::combine([ContentType::Sfw, ContentType::Nsfw]);
    cache.cache_user_info(filter, profile("Foo", 10));

    assert_eq!(cache.user_info(filter, " foo ").unwrap().upload_count, 10);
    assert!(cache.user_info(ContentTypes::SFW, "foo").is_none());

    thread::sleep(Duration::from_millis(250));
    assert!(cache.user_info(filter, "foo").is_none());
}

#[test]
fn test_reposts_from_many_threads() {
    let cache = Arc::new(EnrichmentCache::default());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..250 {
                    cache.cache_reposts([ItemId::new(i * 4 + t)]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.stats().repost_ids, 1_000);
    assert!((0..1_000).all(|id| cache.is_repost(ItemId::new(id))));
    assert!(!cache.is_repost(ItemId::new(1_000)));
}
