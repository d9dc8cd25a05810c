//! PostgreSQL-backed revocation store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use storefront_core::result::AppResult;
use storefront_core::traits::RevocationStore;
use storefront_database::repositories::RevocationRepository;

use super::fingerprint::fingerprint;

/// Revocation records in the `revoked_tokens` table.
#[derive(Debug, Clone)]
pub struct DatabaseRevocationStore {
    repo: RevocationRepository,
}

impl DatabaseRevocationStore {
    /// Wraps a revocation repository.
    pub fn new(repo: RevocationRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RevocationStore for DatabaseRevocationStore {
    async fn record(
        &self,
        token: &str,
        subject_id: i64,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.repo
            .insert(&fingerprint(token), subject_id, expires_at)
            .await
    }

    async fn is_revoked(&self, token: &str) -> AppResult<Option<i64>> {
        self.repo.find_subject(&fingerprint(token)).await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let count = self.repo.delete_expired(now).await?;
        debug!(count, "Purged expired revocation records");
        Ok(count)
    }
}
