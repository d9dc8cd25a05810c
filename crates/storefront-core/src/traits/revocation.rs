//! Revocation store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;

/// Durable record of tokens that were explicitly invalidated before expiry.
///
/// Implementations key records by the token string (or a fingerprint of it).
/// Recording is idempotent: a second `record` for the same token succeeds
/// and leaves the first record in place.
#[async_trait]
pub trait RevocationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a revocation record that remains effective until `expires_at`.
    async fn record(
        &self,
        token: &str,
        subject_id: i64,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Return the revoked subject id if a record exists for `token`.
    async fn is_revoked(&self, token: &str) -> AppResult<Option<i64>>;

    /// Delete records whose `expires_at` is at or before `now`.
    ///
    /// Returns the number of records removed. Backends that expire entries
    /// on their own may return zero.
    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
