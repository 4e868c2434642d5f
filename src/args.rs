//! Command-line arguments for the demo binary

use clap::Parser;
use std::path::PathBuf;

use crate::feed::{FeedQuery, FeedType};
use crate::types::ContentTypes;

/// Page through an in-memory feed, snapshot the window and restore it
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct DemoArgs {
    /// Configuration file path (defaults are used when it does not exist)
    #[arg(short, long, default_value = "feed-window.toml", env = "FEED_WINDOW_CONFIG")]
    pub config: PathBuf,

    /// Feed to page through
    #[arg(short = 'f', long, value_enum, default_value = "promoted")]
    pub feed_type: FeedType,

    /// Comma separated content types, e.g. "sfw,nsfw"
    #[arg(long, default_value = "sfw")]
    pub content_types: ContentTypes,

    /// Number of items in the in-memory feed
    #[arg(short, long, default_value = "500")]
    pub items: usize,

    /// Number of forward pages to load before taking the snapshot
    #[arg(short, long, default_value = "3")]
    pub pages: usize,

    /// Index recorded in the snapshot
    #[arg(short, long, default_value = "12")]
    pub start_index: usize,

    /// Also write logs to this file
    #[arg(long, env = "FEED_WINDOW_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Number of worker threads (defaults to number of CPU cores)
    #[arg(short, long)]
    pub threads: Option<usize>,
}

impl DemoArgs {
    /// Query described by the arguments
    #[must_use]
    pub fn query(&self) -> FeedQuery {
        FeedQuery::new(self.feed_type, self.content_types)
    }

    /// Worker threads to start, falling back to the available parallelism
    #[must_use]
    pub fn worker_threads(&self) -> usize {
        self.threads.filter(|&t| t > 0).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1)
        })
    }
}
