//! Default values for configuration fields
//!
//! This module centralizes all default value functions used in serde deserialization.

use crate::constants::cache::{
    DEFAULT_TAG_CAPACITY, DEFAULT_TAG_IDLE_SECS, DEFAULT_USER_INFO_CAPACITY,
    DEFAULT_USER_INFO_TTL_SECS,
};
use crate::types::{CacheCapacity, Lookahead, PageSize};
use std::time::Duration;

/// Default idle expiry of tag entries (5 minutes)
#[inline]
pub fn tag_idle() -> Duration {
    Duration::from_secs(DEFAULT_TAG_IDLE_SECS)
}

/// Default lifetime of user info entries (2 minutes)
#[inline]
pub fn user_info_ttl() -> Duration {
    Duration::from_secs(DEFAULT_USER_INFO_TTL_SECS)
}

/// Default number of items to remember tags for
#[inline]
pub fn tag_capacity() -> CacheCapacity {
    CacheCapacity::new(DEFAULT_TAG_CAPACITY).unwrap_or_default()
}

/// Default number of user profiles to keep
#[inline]
pub fn user_info_capacity() -> CacheCapacity {
    CacheCapacity::new(DEFAULT_USER_INFO_CAPACITY).unwrap_or_default()
}

/// Default distance from a window edge that triggers a page load
#[inline]
pub fn lookahead() -> Lookahead {
    Lookahead::DEFAULT
}

/// Default page size of the in-memory loader
#[inline]
pub fn page_size() -> PageSize {
    PageSize::DEFAULT
}
