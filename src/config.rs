//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;

use chrono::Duration;

/// Default freshness window for cached responses (60 seconds).
pub const DEFAULT_TTL_MS: i64 = 60_000;

/// Default debounce window for rapid repeated requests (2 seconds).
pub const DEFAULT_DEBOUNCE_MS: i64 = 2_000;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Freshness window applied when a fetch does not specify its own TTL
    pub default_ttl: Duration,
    /// Window during which repeated fetches for a key short-circuit to the cached value
    pub debounce_window: Duration,
    /// Whether structured log lines are emitted
    pub logging: bool,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FETCH_CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 60000)
    /// - `FETCH_CACHE_DEBOUNCE_MS` - Debounce window in milliseconds (default: 2000)
    /// - `FETCH_CACHE_LOGGING` - Whether to emit log lines (default: true)
    pub fn from_env() -> Self {
        Self {
            default_ttl: Duration::milliseconds(
                env::var("FETCH_CACHE_DEFAULT_TTL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TTL_MS),
            ),
            debounce_window: Duration::milliseconds(
                env::var("FETCH_CACHE_DEBOUNCE_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_DEBOUNCE_MS),
            ),
            logging: env::var("FETCH_CACHE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::milliseconds(DEFAULT_TTL_MS),
            debounce_window: Duration::milliseconds(DEFAULT_DEBOUNCE_MS),
            logging: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.default_ttl, Duration::seconds(60));
        assert_eq!(config.debounce_window, Duration::seconds(2));
        assert!(config.logging);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("FETCH_CACHE_DEFAULT_TTL_MS");
        env::remove_var("FETCH_CACHE_DEBOUNCE_MS");
        env::remove_var("FETCH_CACHE_LOGGING");

        let config = CacheConfig::from_env();
        assert_eq!(config.default_ttl, Duration::seconds(60));
        assert_eq!(config.debounce_window, Duration::seconds(2));
        assert!(config.logging);
    }
}
