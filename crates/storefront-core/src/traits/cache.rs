//! Key/value cache seam used for cache-backed revocation records.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// String key/value store with per-entry expiry (Redis or in-memory).
///
/// An entry must never be returned after its TTL has elapsed.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Value stored under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` for `ttl` unless `key` already holds a live entry.
    ///
    /// Returns `true` if this call created the entry. The check and the
    /// write are a single atomic step.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;

    /// Round-trips to the backend.
    async fn health_check(&self) -> AppResult<()>;
}
