//! Configuration validation
//!
//! Most invariants are enforced by the NonZero newtypes. This checks the
//! remaining semantic constraints before the caches are built.

use anyhow::Result;
use std::time::Duration;

use super::types::{CacheConfig, Config, WindowConfig};
use crate::constants::window::MAX_RECOMMENDED_LOOKAHEAD;

impl Config {
    /// Validate configuration for correctness
    ///
    /// - Cache lifetimes must be non-zero (a zero TTL would make every write a miss)
    /// - Lookahead larger than a page is accepted but warned about
    pub fn validate(&self) -> Result<()> {
        validate_cache(&self.cache)?;
        validate_window(&self.window);
        Ok(())
    }
}

fn validate_cache(cache: &CacheConfig) -> Result<()> {
    if cache.tag_idle == Duration::ZERO {
        anyhow::bail!("cache.tag_idle must be at least 1 second");
    }
    if cache.user_info_ttl == Duration::ZERO {
        anyhow::bail!("cache.user_info_ttl must be at least 1 second");
    }
    Ok(())
}

fn validate_window(window: &WindowConfig) {
    let lookahead = window.lookahead.get();
    if lookahead > MAX_RECOMMENDED_LOOKAHEAD {
        tracing::warn!(
            "window.lookahead is {} (> {}). Pages will be requested long before \
             the user reaches the edge of the window.",
            lookahead,
            MAX_RECOMMENDED_LOOKAHEAD
        );
    }
    if lookahead >= window.page_size.get() {
        tracing::warn!(
            "window.lookahead ({}) is not smaller than window.page_size ({}). \
             Every request near an edge will immediately load another page.",
            lookahead,
            window.page_size
        );
    }
}
