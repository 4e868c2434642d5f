//! Materialized, ordered slice of a remote feed
//!
//! The window is a contiguous subrange of the remote feed, strictly descending
//! by the query's sort key and free of duplicate item ids. It only grows: pages
//! are appended at the tail ([`Direction::Next`]) or prepended at the head
//! ([`Direction::Previous`]).

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::error::WindowError;
use super::loader::Page;
use super::query::{Cursor, Direction, FeedQuery};
use crate::types::{FeedItem, ItemId};

/// Paging state of one window edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeState {
    /// Where the next request in this direction continues from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
    /// Whether the server reported more items beyond this edge
    #[serde(default)]
    pub has_more: bool,
}

impl EdgeState {
    #[must_use]
    pub const fn open() -> Self {
        Self {
            cursor: None,
            has_more: true,
        }
    }

    #[must_use]
    pub const fn closed() -> Self {
        Self {
            cursor: None,
            has_more: false,
        }
    }
}

/// Range of positions a merge inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub direction: Direction,
    /// Index of the first inserted item (0 for a prepend)
    pub start: usize,
    pub count: usize,
}

impl Insertion {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[derive(Debug, Clone)]
pub struct FeedWindow {
    query: FeedQuery,
    items: Vec<FeedItem>,
    /// Sort key of every item, by id
    keys: HashMap<ItemId, i64>,
    next: EdgeState,
    previous: EdgeState,
}

impl FeedWindow {
    /// Empty window at the top of the feed
    ///
    /// Nothing is newer than the top, so only the tail can grow until a page
    /// says otherwise.
    #[must_use]
    pub fn new(query: FeedQuery) -> Self {
        Self {
            query,
            items: Vec::new(),
            keys: HashMap::new(),
            next: EdgeState::open(),
            previous: EdgeState::closed(),
        }
    }

    /// Empty window opening the feed just below `cursor`
    ///
    /// Both edges are open: the first next page holds the items older than
    /// `cursor`, and the head can grow back towards the top of the feed.
    #[must_use]
    pub fn starting_at(query: FeedQuery, cursor: Cursor) -> Self {
        let edge = EdgeState {
            cursor: Some(cursor),
            has_more: true,
        };
        Self {
            query,
            items: Vec::new(),
            keys: HashMap::new(),
            next: edge,
            previous: edge,
        }
    }

    /// Rebuild a window from stored parts, checking order and identity
    pub fn from_parts(
        query: FeedQuery,
        items: Vec<FeedItem>,
        previous: EdgeState,
        next: EdgeState,
    ) -> Result<Self, WindowError> {
        for (index, pair) in items.windows(2).enumerate() {
            if query.sort_key(&pair[0]) <= query.sort_key(&pair[1]) {
                return Err(WindowError::Unordered { index });
            }
        }

        let mut keys = HashMap::with_capacity(items.len());
        for item in &items {
            if keys.insert(item.id, query.sort_key(item)).is_some() {
                return Err(WindowError::Duplicate(item.id));
            }
        }

        Ok(Self {
            query,
            items,
            keys,
            next,
            previous,
        })
    }

    #[must_use]
    pub fn query(&self) -> &FeedQuery {
        &self.query
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> Option<&FeedItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    #[must_use]
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.keys.contains_key(&item_id)
    }

    /// Index of `item`, matched by id
    ///
    /// Metadata of `item` may be stale (an older copy with a different
    /// `promoted` value still finds its slot).
    #[must_use]
    pub fn position(&self, item: &FeedItem) -> Option<usize> {
        self.position_of(item.id)
    }

    /// Index of the item with `item_id`, located by its stored sort key
    #[must_use]
    pub fn position_of(&self, item_id: ItemId) -> Option<usize> {
        let target = *self.keys.get(&item_id)?;
        // descending order: compare target against slot reversed
        let index = self
            .items
            .binary_search_by(|slot| target.cmp(&self.query.sort_key(slot)))
            .ok()?;
        (self.items[index].id == item_id).then_some(index)
    }

    #[must_use]
    pub const fn edge(&self, direction: Direction) -> &EdgeState {
        match direction {
            Direction::Next => &self.next,
            Direction::Previous => &self.previous,
        }
    }

    #[must_use]
    pub fn has_more(&self, direction: Direction) -> bool {
        self.edge(direction).has_more
    }

    /// Cursor to request the page beyond `direction`'s edge
    ///
    /// `None` only for an empty window without a stored cursor.
    #[must_use]
    pub fn cursor_for(&self, direction: Direction) -> Option<Cursor> {
        self.edge(direction)
            .cursor
            .or_else(|| self.edge_item(direction).map(|item| Cursor::of(&self.query, item)))
    }

    fn edge_item(&self, direction: Direction) -> Option<&FeedItem> {
        match direction {
            Direction::Next => self.items.last(),
            Direction::Previous => self.items.first(),
        }
    }

    fn edge_mut(&mut self, direction: Direction) -> &mut EdgeState {
        match direction {
            Direction::Next => &mut self.next,
            Direction::Previous => &mut self.previous,
        }
    }

    /// Merge a page into the window at `direction`'s edge
    ///
    /// Items already in the window, repeated within the page, or not strictly
    /// beyond the edge in sort order are dropped. Survivors are inserted in
    /// descending order.
    pub fn merge(&mut self, direction: Direction, page: Page) -> Insertion {
        let received = page.items.len();
        let query = &self.query;

        let mut seen = HashSet::with_capacity(received);
        let mut fresh: Vec<FeedItem> = page
            .items
            .into_iter()
            .filter(|item| !self.keys.contains_key(&item.id) && seen.insert(item.id))
            .collect();
        fresh.sort_by(|a, b| query.sort_key(b).cmp(&query.sort_key(a)));
        fresh.dedup_by(|a, b| query.sort_key(a) == query.sort_key(b));

        match direction {
            Direction::Next => {
                if let Some(last) = self.items.last() {
                    let edge = query.sort_key(last);
                    fresh.retain(|item| query.sort_key(item) < edge);
                }
            }
            Direction::Previous => {
                if let Some(first) = self.items.first() {
                    let edge = query.sort_key(first);
                    fresh.retain(|item| query.sort_key(item) > edge);
                }
            }
        }

        let count = fresh.len();
        if count < received {
            debug!(
                "Dropped {} of {} {} items (duplicates or out of order)",
                received - count,
                received,
                direction
            );
        }

        let was_empty = self.items.is_empty();
        self.keys
            .extend(fresh.iter().map(|item| (item.id, query.sort_key(item))));
        let start = match direction {
            Direction::Next => {
                let start = self.items.len();
                self.items.extend(fresh);
                start
            }
            Direction::Previous => {
                self.items.splice(0..0, fresh);
                0
            }
        };

        let derived = self
            .edge_item(direction)
            .map(|item| Cursor::of(&self.query, item));
        let edge = self.edge_mut(direction);
        edge.has_more = page.has_more;
        if let Some(cursor) = page.cursor.or(derived) {
            edge.cursor = Some(cursor);
        }
        // the first items define the opposite edge from now on
        if was_empty && count > 0 {
            self.edge_mut(direction.opposite()).cursor = None;
        }

        Insertion {
            direction,
            start,
            count,
        }
    }
}
