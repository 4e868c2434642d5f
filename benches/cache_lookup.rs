//! Benchmarks for enrichment cache hot paths
//!
//! Measures:
//! - RepostCache lookups (hit vs miss) and publishing
//! - TagCache merge with fresh and known tags
//! - UserInfoCache lookup with name normalization
//!
//! Run with: cargo bench --bench cache_lookup

use divan::{Bencher, black_box};
use feed_window::cache::{EnhancedUserInfo, RepostCache, Tag, TagCache, UserInfoCache, UserSummary};
use feed_window::types::{ContentTypes, ItemId};
use std::time::Duration;

fn main() {
    divan::main();
}

// =============================================================================
// RepostCache
// =============================================================================

mod reposts {
    use super::*;

    fn filled(count: i64) -> RepostCache {
        let cache = RepostCache::new();
        cache.cache_reposts((0..count).map(|i| ItemId::new(i * 3)));
        cache
    }

    #[divan::bench(args = [100, 10_000])]
    fn is_repost_hit(bencher: Bencher, count: i64) {
        let cache = filled(count);
        let needle = ItemId::new((count / 2) * 3);
        bencher.bench(|| black_box(&cache).is_repost(black_box(needle)));
    }

    #[divan::bench(args = [100, 10_000])]
    fn is_repost_miss(bencher: Bencher, count: i64) {
        let cache = filled(count);
        let needle = ItemId::new((count / 2) * 3 + 1);
        bencher.bench(|| black_box(&cache).is_repost(black_box(needle)));
    }

    #[divan::bench(sample_count = 100)]
    fn cache_reposts_page(bencher: Bencher) {
        bencher
            .with_inputs(|| filled(10_000))
            .bench_values(|cache| {
                cache.cache_reposts((0..120).map(|i| ItemId::new(i * 7 + 1)));
                black_box(cache)
            });
    }
}

// =============================================================================
// TagCache
// =============================================================================

mod tags {
    use super::*;

    fn tags(offset: i64) -> Vec<Tag> {
        (0..20)
            .map(|i| Tag::new(offset + i, format!("tag{}", offset + i), 0.5))
            .collect()
    }

    #[divan::bench]
    fn enhance_new_item(bencher: Bencher) {
        let cache = TagCache::new(10_000, Duration::from_secs(300));
        let mut next = 0;
        bencher.bench_local(|| {
            next += 1;
            black_box(cache.enhance(ItemId::new(next), tags(0)))
        });
    }

    #[divan::bench]
    fn enhance_known_item(bencher: Bencher) {
        let cache = TagCache::new(10_000, Duration::from_secs(300));
        let item = ItemId::new(1);
        cache.enhance(item, tags(0));
        bencher.bench(|| black_box(cache.enhance(item, tags(10))));
    }
}

// =============================================================================
// UserInfoCache
// =============================================================================

mod user_info {
    use super::*;

    #[divan::bench]
    fn get_normalized_hit(bencher: Bencher) {
        let cache = UserInfoCache::new(1_000, Duration::from_secs(120));
        cache.cache(
            ContentTypes::SFW,
            EnhancedUserInfo {
                user: UserSummary {
                    id: 1,
                    name: "SomeUser".to_string(),
                    mark: 2,
                    score: 100,
                    registered: 0,
                },
                upload_count: 10,
                comment_count: 20,
                tag_count: 30,
            },
        );
        bencher.bench(|| black_box(cache.get(ContentTypes::SFW, black_box(" someuser "))));
    }
}
