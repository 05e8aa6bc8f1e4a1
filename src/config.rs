//! Configuration Module
//!
//! Handles loading the cache defaults from environment variables or from a
//! host application's own configuration file.

use std::env;
use std::time::Duration;

use serde::Deserialize;

/// Environment variable holding the default TTL in milliseconds.
pub const DEFAULT_TTL_ENV: &str = "GACHE_DEFAULT_TTL_MS";

/// Cache configuration parameters.
///
/// Deserializable so it can be nested inside a larger config struct; missing
/// fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Default TTL in milliseconds for the default group, 0 or less = never expires
    pub default_ttl_ms: i64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 0, never expires)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            default_ttl_ms: lookup(DEFAULT_TTL_ENV)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
        }
    }

    /// Returns the default TTL, with non-positive values normalized to zero.
    pub fn default_ttl(&self) -> Duration {
        if self.default_ttl_ms <= 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(self.default_ttl_ms as u64)
        }
    }
}
