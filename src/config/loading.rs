//! Configuration loading from files and environment variables
//!
//! This module handles loading configuration from TOML files and environment
//! variables, with environment variables taking precedence for container
//! deployments.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use super::types::Config;
use crate::types::Lookahead;

/// Idle expiry of tag entries, in seconds
pub const ENV_TAG_IDLE_SECS: &str = "FEED_WINDOW_TAG_IDLE_SECS";
/// Lifetime of user info entries, in seconds
pub const ENV_USER_INFO_TTL_SECS: &str = "FEED_WINDOW_USER_INFO_TTL_SECS";
/// Edge distance that triggers a page load
pub const ENV_LOOKAHEAD: &str = "FEED_WINDOW_LOOKAHEAD";

/// Where the effective configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the given file
    File,
    /// File did not exist, defaults were used
    Defaults,
}

impl ConfigSource {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "config file",
            Self::Defaults => "built-in defaults",
        }
    }
}

/// Apply environment overrides using `lookup` to read variables
///
/// Unparseable values are ignored with a warning; the file or default value stays.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(secs) = parse_var::<u64, _>(&lookup, ENV_TAG_IDLE_SECS) {
        config.cache.tag_idle = Duration::from_secs(secs);
    }
    if let Some(secs) = parse_var::<u64, _>(&lookup, ENV_USER_INFO_TTL_SECS) {
        config.cache.user_info_ttl = Duration::from_secs(secs);
    }
    if let Some(lookahead) = parse_var::<Lookahead, _>(&lookup, ENV_LOOKAHEAD) {
        config.window.lookahead = lookahead;
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => {
            tracing::info!("Using {}={} from environment", key, raw.trim());
            Some(value)
        }
        Err(e) => {
            tracing::warn!("Ignoring invalid {}='{}': {}", key, raw, e);
            None
        }
    }
}

/// Load configuration from a TOML file, with environment variable overrides
pub fn load_config(config_path: impl AsRef<Path>) -> Result<Config> {
    let config_path = config_path.as_ref();
    let config_content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file '{}'", config_path.display()))?;

    let mut config: Config = toml::from_str(&config_content)
        .with_context(|| format!("Failed to parse config file '{}'", config_path.display()))?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.validate()?;

    Ok(config)
}

/// Load configuration from `config_path` if it exists, defaults otherwise
///
/// A file that exists but fails to parse is an error, not a fallback.
pub fn load_config_with_fallback(config_path: impl AsRef<Path>) -> Result<(Config, ConfigSource)> {
    let config_path = config_path.as_ref();
    if config_path.exists() {
        return Ok((load_config(config_path)?, ConfigSource::File));
    }

    tracing::info!(
        "Config file '{}' not found, using defaults",
        config_path.display()
    );
    let mut config = create_default_config();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.validate()?;
    Ok((config, ConfigSource::Defaults))
}

/// Create a default configuration for examples/testing
#[must_use]
pub fn create_default_config() -> Config {
    Config::default()
}
