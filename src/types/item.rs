//! Feed item identity

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::ContentType;

/// Server-assigned item identity
///
/// Unique and monotonically increasing: a larger id was uploaded later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    #[must_use]
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry of a feed
///
/// Immutable once received. Equality and hashing only look at [`FeedItem::id`];
/// vote counts and other metadata may differ between two fetches of the same
/// item without making them different items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: ItemId,
    /// Promotion id, the ranking key of the promoted feed (0 = not promoted)
    #[serde(default)]
    pub promoted: i64,
    pub content_type: ContentType,
    /// Upload time, unix seconds
    pub created: i64,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub up: i32,
    #[serde(default)]
    pub down: i32,
}

impl FeedItem {
    /// Create an item with only identity-relevant fields set
    #[must_use]
    pub fn new(id: impl Into<ItemId>, content_type: ContentType, created: i64) -> Self {
        Self {
            id: id.into(),
            promoted: 0,
            content_type,
            created,
            user: String::new(),
            up: 0,
            down: 0,
        }
    }

    #[must_use]
    pub fn with_promoted(mut self, promoted: i64) -> Self {
        self.promoted = promoted;
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    #[must_use]
    #[inline]
    pub fn is_promoted(&self) -> bool {
        self.promoted > 0
    }

    /// Net score
    #[must_use]
    #[inline]
    pub fn score(&self) -> i64 {
        i64::from(self.up) - i64::from(self.down)
    }
}

impl PartialEq for FeedItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FeedItem {}

impl Hash for FeedItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
