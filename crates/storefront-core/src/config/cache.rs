//! Cache provider settings, used when revocations live in the cache.

use serde::{Deserialize, Serialize};

/// Which provider to build and how to reach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// `"memory"` or `"redis"`.
    pub provider: String,
    /// Redis connection settings.
    pub redis: RedisCacheConfig,
    /// In-process cache settings.
    pub memory: MemoryCacheConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: "memory".to_string(),
            redis: RedisCacheConfig::default(),
            memory: MemoryCacheConfig::default(),
        }
    }
}

/// Redis settings. Every instance sharing `url` and `key_prefix` sees the
/// same revocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisCacheConfig {
    /// Connection URL.
    pub url: String,
    /// Prepended to every key.
    pub key_prefix: String,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            key_prefix: "storefront:".to_string(),
        }
    }
}

/// In-process cache settings.
///
/// Entries beyond `max_capacity` are evicted; size it above the number of
/// tokens expected to be revoked within one token lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryCacheConfig {
    /// Maximum number of entries.
    pub max_capacity: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 100_000,
        }
    }
}
