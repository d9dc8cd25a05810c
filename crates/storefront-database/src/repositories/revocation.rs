//! Revoked token repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;

/// Repository for the `revoked_tokens` table.
///
/// Rows are keyed by a token fingerprint computed by the caller; the raw
/// token never reaches the database.
#[derive(Debug, Clone)]
pub struct RevocationRepository {
    pool: PgPool,
}

impl RevocationRepository {
    /// Create a new revocation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a revocation row. An existing row for the same hash is kept.
    pub async fn insert(
        &self,
        token_hash: &str,
        subject_id: i64,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO revoked_tokens (token_hash, subject_id, expires_at, revoked_at) \
             VALUES ($1, $2, $3, NOW()) \
             ON CONFLICT (token_hash) DO NOTHING",
        )
        .bind(token_hash)
        .bind(subject_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record revoked token", e)
        })?;
        Ok(())
    }

    /// Return the subject id recorded for `token_hash`, if any.
    pub async fn find_subject(&self, token_hash: &str) -> AppResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>("SELECT subject_id FROM revoked_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to look up revoked token", e)
            })
    }

    /// Delete rows whose expiry is at or before `now`.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to delete expired revocations",
                    e,
                )
            })?;
        let count = result.rows_affected();
        debug!(count, "Deleted expired revocation rows");
        Ok(count)
    }
}
