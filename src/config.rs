//! Configuration Module
//!
//! Handles cache sizing configuration from code or environment variables.

use std::env;

use crate::error::{CacheError, Result};

/// Default maximum number of entries.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Default shard count for the sharded store.
pub const DEFAULT_SHARDS: usize = 8;

/// Cache sizing parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Number of independent sub-stores used by the sharded store
    pub shards: usize,
}

impl CacheConfig {
    /// Creates a config with the given capacity and the default shard count.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            shards: DEFAULT_SHARDS,
        }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HOTCACHE_CAPACITY` - Maximum cache entries (default: 1024)
    /// - `HOTCACHE_SHARDS` - Shard count for the sharded store (default: 8)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("HOTCACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
            shards: env::var("HOTCACHE_SHARDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SHARDS),
        }
    }

    /// Checks that the configuration describes a usable cache.
    ///
    /// A zero capacity would make every insertion evict itself, and a zero
    /// shard count leaves no sub-store to route keys to. Both are rejected
    /// at construction rather than producing a degenerate cache.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.shards == 0 {
            return Err(CacheError::InvalidConfiguration(
                "shard count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            shards: DEFAULT_SHARDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 1024);
        assert_eq!(config.shards, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("HOTCACHE_CAPACITY");
        env::remove_var("HOTCACHE_SHARDS");

        let config = CacheConfig::from_env();
        assert_eq!(config.capacity, 1024);
        assert_eq!(config.shards, 8);
    }

    #[test]
    fn test_config_rejects_zero_capacity() {
        let config = CacheConfig {
            capacity: 0,
            shards: 8,
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_config_rejects_zero_shards() {
        let config = CacheConfig {
            capacity: 16,
            shards: 0,
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfiguration(_))
        ));
    }
}
