//! Constants used throughout the crate
//!
//! This module centralizes magic numbers and configuration values
//! to improve maintainability and reduce duplication.

/// Enrichment cache constants
pub mod cache {
    /// Tags expire 5 minutes after the last access
    pub const DEFAULT_TAG_IDLE_SECS: u64 = 5 * 60;

    /// User info expires 2 minutes after it was written
    pub const DEFAULT_USER_INFO_TTL_SECS: u64 = 2 * 60;

    /// Items with remembered tags
    pub const DEFAULT_TAG_CAPACITY: u64 = 10_000;

    /// Remembered user profiles
    pub const DEFAULT_USER_INFO_CAPACITY: u64 = 1_000;
}

/// Feed window constants
pub mod window {
    /// Above this, lookahead triggers loads far from the visible item
    pub const MAX_RECOMMENDED_LOOKAHEAD: usize = 64;
}

/// Window snapshot constants
pub mod snapshot {
    /// Current snapshot format version
    ///
    /// Bump when a field changes meaning. Adding an optional field does not
    /// need a bump: older readers ignore unknown fields.
    pub const VERSION: u32 = 1;
}
