//! Cache-backed revocation store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{CacheProvider, RevocationStore};

use super::fingerprint::fingerprint;

/// Cache key prefix for revoked token fingerprints.
const REVOKED_PREFIX: &str = "auth:revoked:";

/// Revocation records held in the cache provider.
///
/// Each entry lives for the token's remaining lifetime, so expired records
/// disappear without a purge.
#[derive(Debug, Clone)]
pub struct CacheRevocationStore {
    cache: Arc<dyn CacheProvider>,
}

impl CacheRevocationStore {
    /// Wraps a cache provider.
    pub fn new(cache: Arc<dyn CacheProvider>) -> Self {
        Self { cache }
    }

    fn key(token: &str) -> String {
        format!("{REVOKED_PREFIX}{}", fingerprint(token))
    }
}

#[async_trait]
impl RevocationStore for CacheRevocationStore {
    async fn record(
        &self,
        token: &str,
        subject_id: i64,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let remaining = (expires_at - Utc::now()).to_std().unwrap_or_default();
        if remaining.is_zero() {
            return Ok(());
        }

        // The first record for a token wins; repeats leave it untouched.
        self.cache
            .set_if_absent(&Self::key(token), &subject_id.to_string(), remaining)
            .await
            .map(|_| ())
    }

    async fn is_revoked(&self, token: &str) -> AppResult<Option<i64>> {
        match self.cache.get(&Self::key(token)).await? {
            Some(value) => match value.parse::<i64>() {
                Ok(subject_id) => Ok(Some(subject_id)),
                Err(e) => {
                    warn!(error = %e, "Unreadable revocation entry");
                    Err(AppError::cache(format!("Corrupt revocation entry: {e}")))
                }
            },
            None => Ok(None),
        }
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> AppResult<u64> {
        Ok(0)
    }
}
