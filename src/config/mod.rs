//! Configuration module
//!
//! This module handles all configuration types and loading
//! for the feed window and the enrichment cache.

mod defaults;
mod loading;
mod types;
mod validation;

// Re-export public types
pub use loading::{
    ConfigSource, apply_env_overrides, create_default_config, load_config,
    load_config_with_fallback,
};
pub use types::{CacheConfig, Config, WindowConfig};

// Re-export default functions for use in tests and other modules
pub use defaults::{
    lookahead, page_size, tag_capacity, tag_idle, user_info_capacity, user_info_ttl,
};
