//! In-memory feed loader
//!
//! Serves pages from a fixed item list the way the remote API does: filtered
//! by the query, newest first, paged by sort key cursor. Failures, overlapping
//! pages and latency can be injected to exercise the window's merge rules.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

use super::error::LoadError;
use super::loader::{FeedLoader, Page};
use super::query::{Cursor, FeedQuery};
use crate::types::{ContentType, FeedItem, PageSize};

/// `count` items with ids `count..=1`, newest first
///
/// Every item is promoted with a promotion id equal to its item id, so the
/// list serves both feed types.
#[must_use]
pub fn synthetic_items(count: usize) -> Vec<FeedItem> {
    (1..=count as i64)
        .rev()
        .map(|id| {
            FeedItem::new(id, ContentType::Sfw, 1_500_000_000 + id * 60)
                .with_promoted(id)
                .with_user(format!("user{}", id % 7))
        })
        .collect()
}

#[derive(Debug)]
pub struct MemoryFeedLoader {
    items: Mutex<Vec<FeedItem>>,
    page_size: PageSize,
    overlap: usize,
    delay: Option<Duration>,
    failures: AtomicUsize,
    fetches: AtomicUsize,
}

impl MemoryFeedLoader {
    #[must_use]
    pub fn new(items: Vec<FeedItem>, page_size: PageSize) -> Self {
        Self {
            items: Mutex::new(items),
            page_size,
            overlap: 0,
            delay: None,
            failures: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Loader over [`synthetic_items`]
    #[must_use]
    pub fn sequential(count: usize, page_size: usize) -> Self {
        Self::new(
            synthetic_items(count),
            PageSize::new(page_size).unwrap_or_default(),
        )
    }

    /// Repeat the last `overlap` items before the cursor at the start of every page
    #[must_use]
    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Sleep before answering each request
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the next `count` requests with a network error
    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    /// Add items to the feed, as if they were uploaded after the loader was built
    pub fn publish<I>(&self, items: I)
    where
        I: IntoIterator<Item = FeedItem>,
    {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(items);
    }

    /// Number of fetch calls answered so far, failed ones included
    #[must_use]
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    async fn begin(&self) -> Result<(), LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let injected = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(LoadError::Network("injected failure".into()));
        }
        Ok(())
    }

    /// Items of `query`, newest first
    fn feed(&self, query: &FeedQuery) -> Vec<FeedItem> {
        let mut feed: Vec<FeedItem> = self
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|item| query.accepts(item))
            .cloned()
            .collect();
        feed.sort_by(|a, b| query.sort_key(b).cmp(&query.sort_key(a)));
        feed
    }
}

#[async_trait]
impl FeedLoader for MemoryFeedLoader {
    async fn fetch_next(&self, query: &FeedQuery, cursor: Option<Cursor>) -> Result<Page, LoadError> {
        self.begin().await?;
        let feed = self.feed(query);

        let start = cursor.map_or(0, |cursor| {
            feed.partition_point(|item| query.sort_key(item) >= cursor.get())
        });
        let end = (start + self.page_size.get()).min(feed.len());
        let from = start.saturating_sub(self.overlap);

        debug!("Serving next {}..{} of {} for {}", from, end, feed.len(), query);
        Ok(Page::new(feed[from..end].to_vec(), end < feed.len()))
    }

    async fn fetch_previous(
        &self,
        query: &FeedQuery,
        cursor: Option<Cursor>,
    ) -> Result<Page, LoadError> {
        self.begin().await?;
        let Some(cursor) = cursor else {
            return Ok(Page::end());
        };
        let feed = self.feed(query);

        let end = feed.partition_point(|item| query.sort_key(item) > cursor.get());
        let start = end.saturating_sub(self.page_size.get());
        let to = (end + self.overlap).min(feed.len());

        debug!("Serving previous {}..{} of {} for {}", start, to, feed.len(), query);
        Ok(Page::new(feed[start..to].to_vec(), start > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::query::{Direction, FeedType};
    use crate::types::ContentTypes;

    fn ids(page: &Page) -> Vec<i64> {
        page.items.iter().map(|item| item.id.get()).collect()
    }

    fn query() -> FeedQuery {
        FeedQuery::new(FeedType::New, ContentTypes::SFW)
    }

    #[tokio::test]
    async fn test_pages_forward_by_cursor() {
        let loader = MemoryFeedLoader::sequential(7, 3);
        let first = loader.fetch_next(&query(), None).await.unwrap();
        assert_eq!(ids(&first), vec![7, 6, 5]);
        assert!(first.has_more);

        let last = loader
            .fetch_next(&query(), Some(Cursor::new(2)))
            .await
            .unwrap();
        assert_eq!(ids(&last), vec![1]);
        assert!(!last.has_more);
    }

    #[tokio::test]
    async fn test_previous_page_is_closest_to_cursor() {
        let loader = MemoryFeedLoader::sequential(10, 3);
        let page = loader
            .fetch(Direction::Previous, &query(), Some(Cursor::new(4)))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![7, 6, 5]);
        assert!(page.has_more);

        let top = loader
            .fetch_previous(&query(), Some(Cursor::new(10)))
            .await
            .unwrap();
        assert!(top.items.is_empty());
        assert!(!top.has_more);
    }

    #[tokio::test]
    async fn test_overlap_and_failure_injection() {
        let loader = MemoryFeedLoader::sequential(10, 3).with_overlap(2);
        loader.fail_next(1);

        assert!(loader.fetch_next(&query(), None).await.is_err());
        let page = loader
            .fetch_next(&query(), Some(Cursor::new(8)))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![9, 8, 7, 6, 5]);
        assert_eq!(loader.fetches(), 2);
    }

    #[tokio::test]
    async fn test_published_items_become_previous_page() {
        let loader = MemoryFeedLoader::sequential(5, 10);
        loader.publish([FeedItem::new(6, ContentType::Sfw, 0)]);

        let page = loader
            .fetch_previous(&query(), Some(Cursor::new(5)))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![6]);
    }
}
