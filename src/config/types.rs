//! Configuration type definitions
//!
//! This module contains all the core configuration structures.

use crate::types::{CacheCapacity, Lookahead, PageSize, duration_serde};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Enrichment cache settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Feed window settings
    #[serde(default)]
    pub window: WindowConfig,
}

/// Enrichment cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// Tags expire after this long without access (seconds)
    #[serde(with = "duration_serde", default = "super::defaults::tag_idle")]
    pub tag_idle: Duration,
    /// User info expires this long after it was written (seconds)
    #[serde(with = "duration_serde", default = "super::defaults::user_info_ttl")]
    pub user_info_ttl: Duration,
    /// Maximum number of items with cached tags
    #[serde(default = "super::defaults::tag_capacity")]
    pub tag_capacity: CacheCapacity,
    /// Maximum number of cached user profiles
    #[serde(default = "super::defaults::user_info_capacity")]
    pub user_info_capacity: CacheCapacity,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            tag_idle: super::defaults::tag_idle(),
            user_info_ttl: super::defaults::user_info_ttl(),
            tag_capacity: super::defaults::tag_capacity(),
            user_info_capacity: super::defaults::user_info_capacity(),
        }
    }
}

/// Feed window configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    /// Trigger a page load when a requested index is closer than this to an edge
    #[serde(default = "super::defaults::lookahead")]
    pub lookahead: Lookahead,
    /// Items per page for the in-memory loader
    #[serde(default = "super::defaults::page_size")]
    pub page_size: PageSize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            lookahead: super::defaults::lookahead(),
            page_size: super::defaults::page_size(),
        }
    }
}
