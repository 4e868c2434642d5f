//! Loader adapter between the feed window and the remote feed API
//!
//! Implementations own transport, retry and backoff. The window only asks for
//! the page after (or before) a cursor and merges whatever comes back.

use async_trait::async_trait;

use super::error::LoadError;
use super::query::{Cursor, Direction, FeedQuery};
use crate::types::FeedItem;

/// One page of a remote feed
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Items in server order (newest first); may overlap the window edge
    pub items: Vec<FeedItem>,
    /// Cursor to continue from in the same direction, if the server provides one
    pub cursor: Option<Cursor>,
    /// Whether the server has more items beyond this page
    pub has_more: bool,
}

impl Page {
    #[must_use]
    pub fn new(items: Vec<FeedItem>, has_more: bool) -> Self {
        Self {
            items,
            cursor: None,
            has_more,
        }
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Empty final page
    #[must_use]
    pub fn end() -> Self {
        Self::default()
    }
}

/// Fetches pages of a feed
///
/// `cursor` is `None` when the window has no edge in that direction yet
/// (an empty window), meaning "start from the top of the feed".
#[async_trait]
pub trait FeedLoader: Send + Sync {
    /// Items older than `cursor`
    async fn fetch_next(&self, query: &FeedQuery, cursor: Option<Cursor>) -> Result<Page, LoadError>;

    /// Items newer than `cursor`
    async fn fetch_previous(
        &self,
        query: &FeedQuery,
        cursor: Option<Cursor>,
    ) -> Result<Page, LoadError>;

    /// Dispatch on `direction`
    async fn fetch(
        &self,
        direction: Direction,
        query: &FeedQuery,
        cursor: Option<Cursor>,
    ) -> Result<Page, LoadError> {
        match direction {
            Direction::Next => self.fetch_next(query, cursor).await,
            Direction::Previous => self.fetch_previous(query, cursor).await,
        }
    }
}
