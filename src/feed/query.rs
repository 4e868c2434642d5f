//! Feed parameters and ordering
//!
//! A feed is always newest-first: strictly descending by the sort key of its
//! [`FeedType`]. The sort key doubles as the remote paging cursor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{ContentTypes, FeedItem};

/// Which remote stream a feed shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    /// Every upload, ordered by item id
    New,
    /// Promoted uploads only, ordered by promotion id
    #[default]
    Promoted,
}

impl FeedType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Promoted => "promoted",
        }
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters identifying a remote feed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedQuery {
    pub feed_type: FeedType,
    pub content_types: ContentTypes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl FeedQuery {
    #[must_use]
    pub fn new(feed_type: FeedType, content_types: ContentTypes) -> Self {
        Self {
            feed_type,
            content_types,
            tags: None,
            user: None,
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Ordering key of `item` within this feed
    #[must_use]
    #[inline]
    pub fn sort_key(&self, item: &FeedItem) -> i64 {
        match self.feed_type {
            FeedType::New => item.id.get(),
            FeedType::Promoted => item.promoted,
        }
    }

    /// Whether `item` can appear in this feed at all
    #[must_use]
    pub fn accepts(&self, item: &FeedItem) -> bool {
        let promoted_ok = match self.feed_type {
            FeedType::New => true,
            FeedType::Promoted => item.is_promoted(),
        };
        let user_ok = self
            .user
            .as_deref()
            .is_none_or(|user| user.eq_ignore_ascii_case(&item.user));
        promoted_ok && user_ok && self.content_types.contains(item.content_type)
    }
}

impl fmt::Display for FeedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.feed_type, self.content_types)?;
        if let Some(tags) = &self.tags {
            write!(f, " tags={tags}")?;
        }
        if let Some(user) = &self.user {
            write!(f, " user={user}")?;
        }
        Ok(())
    }
}

/// Remote paging cursor: the sort key a request continues from (exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(i64);

impl Cursor {
    #[must_use]
    #[inline]
    pub const fn new(sort_key: i64) -> Self {
        Self(sort_key)
    }

    /// Cursor pointing at `item` within `query`
    #[must_use]
    #[inline]
    pub fn of(query: &FeedQuery, item: &FeedItem) -> Self {
        Self(query.sort_key(item))
    }

    #[must_use]
    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

/// Growth direction of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Append at the tail (older items)
    Next,
    /// Prepend at the head (newer items)
    Previous,
}

impl Direction {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Next => Self::Previous,
            Self::Previous => Self::Next,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Next => "next",
            Self::Previous => "previous",
        })
    }
}
