//! Error types for the feed window
//!
//! Index faults and removal attempts are programming errors of the caller or
//! the data source. Loader failures are recoverable and only surface to the
//! change listener.

use thiserror::Error;

use crate::types::ItemId;

/// Errors returned by [`FeedProxy`](super::FeedProxy) queries
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProxyError {
    /// Index outside the currently materialized window
    #[error("index {index} out of range for window of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// The window only grows; removing items is a broken contract
    #[error("removal of {count} items at {start} is not supported by the feed window")]
    RemovalUnsupported { start: usize, count: usize },
}

/// Failure reported by a [`FeedLoader`](super::FeedLoader)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    /// Transport level failure (offline, timeout, connection reset)
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an error status
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The loader gave up on the request
    #[error("request cancelled")]
    Cancelled,

    /// The loader panicked while fetching
    #[error("loader panicked")]
    Panicked,
}

impl LoadError {
    /// Whether retrying the same request later can succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Cancelled => true,
            Self::Server { status, .. } => *status >= 500,
            Self::Panicked => false,
        }
    }
}

/// Window contents that break ordering or identity invariants
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum WindowError {
    #[error("items at {index} and {} are not in strictly descending order", .index + 1)]
    Unordered { index: usize },

    #[error("item {0} appears more than once")]
    Duplicate(ItemId),
}

/// Errors while restoring a [`WindowSnapshot`](super::WindowSnapshot)
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("snapshot version {found} is not supported (newest known: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("snapshot has no version field")]
    MissingVersion,

    #[error("snapshot index {index} outside restored window of {len} items")]
    IndexOutOfWindow { index: usize, len: usize },

    #[error("corrupt snapshot: {0}")]
    Corrupt(#[from] WindowError),

    #[error("invalid snapshot json: {0}")]
    Json(#[from] serde_json::Error),
}
