use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use feed_window::cache::{EnhancedUserInfo, UserSummary};
use feed_window::feed::synthetic_items;
use feed_window::logging::{init_dual_logging, init_logging};
use feed_window::{
    DemoArgs, Direction, EnrichmentCache, FeedItem, FeedProxy, FeedQuery, MemoryFeedLoader, Tag,
    WindowSnapshot, load_config_with_fallback,
};

fn main() -> Result<()> {
    let args = DemoArgs::parse();

    // keep the guard alive until exit so the file writer flushes
    let log_guard = args.log_file.as_deref().map(init_dual_logging);
    if log_guard.is_none() {
        init_logging();
    }

    let worker_threads = args.worker_threads();
    info!("Starting feed window demo with {} worker threads", worker_threads);
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;
    rt.block_on(run(args))
}

async fn run(args: DemoArgs) -> Result<()> {
    let (config, source) = load_config_with_fallback(&args.config)?;
    info!("Loaded configuration from {}", source.as_str());

    let cache = EnrichmentCache::shared(&config.cache);
    let query = args.query();
    let loader = Arc::new(MemoryFeedLoader::new(
        synthetic_items(args.items),
        config.window.page_size,
    ));

    let mut proxy = FeedProxy::from_config(query.clone(), &config.window).with_loader(loader.clone());
    for _ in 0..args.pages {
        if !proxy.load_next_page().is_started() {
            break;
        }
        match proxy.next_completion().await {
            Some(Ok(insertion)) => {
                enrich(&cache, &query, proxy.window().items(), insertion.start, insertion.count);
            }
            Some(Err(e)) => warn!("Page load failed: {}", e),
            None => break,
        }
    }
    info!(
        "Window holds {} items after {} fetches (more: {})",
        proxy.item_count(),
        loader.fetches(),
        proxy.has_more(Direction::Next)
    );

    let index = args.start_index.min(proxy.item_count().saturating_sub(1));
    let before = proxy.item_id_at(index).ok();
    let json = proxy
        .snapshot(index)
        .to_json()
        .context("Failed to serialize window snapshot")?;
    info!("Snapshot at index {} is {} bytes", index, json.len());
    drop(proxy);

    let snapshot = WindowSnapshot::from_json(&json).context("Failed to parse window snapshot")?;
    let (mut restored, index) = FeedProxy::from_snapshot(snapshot)?;
    restored.set_loader(loader);
    let after = restored.item_id_at(index).ok();
    if before == after {
        info!("Restored item at index {}: {:?}", index, after);
    } else {
        warn!("Restored item mismatch at {}: {:?} != {:?}", index, before, after);
    }

    cache.sync();
    info!(
        "Enrichment cache: {} (user info hit rate {:.1}%)",
        cache.stats(),
        cache.user_info_hit_rate()
    );
    Ok(())
}

/// Attach demo enrichment to freshly inserted items
fn enrich(
    cache: &EnrichmentCache,
    query: &FeedQuery,
    items: &[FeedItem],
    start: usize,
    count: usize,
) {
    for item in &items[start..start + count] {
        let tag = Tag::new(item.id.get() * 10, format!("tag{}", item.id.get() % 5), 0.5);
        cache.enhance_tags(item.id, [tag]);
        if item.id.get() % 11 == 0 {
            cache.cache_reposts([item.id]);
        }
        if cache.user_info(query.content_types, &item.user).is_none() {
            cache.cache_user_info(
                query.content_types,
                EnhancedUserInfo {
                    user: UserSummary {
                        id: item.id.get(),
                        name: item.user.clone(),
                        mark: 0,
                        score: item.score(),
                        registered: item.created,
                    },
                    upload_count: 1,
                    comment_count: 0,
                    tag_count: 1,
                },
            );
        }
    }
}
