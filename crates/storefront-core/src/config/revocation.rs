//! Revocation store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Most lookup retries accepted per request.
pub const MAX_LOOKUP_RETRIES: u32 = 10;

/// Longest total time one request may spend on revocation lookups.
pub const MAX_LOOKUP_BUDGET_MS: u64 = 5_000;

/// Which backend holds revocation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    /// The `revoked_tokens` table in PostgreSQL.
    Database,
    /// The configured cache provider (Redis or in-memory), with per-entry TTL.
    Cache,
}

/// Revocation lookup and cleanup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevocationConfig {
    /// Backend that stores revocation records.
    #[serde(default = "default_backend")]
    pub backend: RevocationBackend,
    /// Upper bound on a single store call, in milliseconds.
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
    /// Additional lookup attempts after a timed-out or failed one.
    #[serde(default = "default_lookup_retries")]
    pub lookup_retries: u32,
    /// Pause between lookup attempts, in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Interval between purges of expired records, in seconds.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

impl RevocationConfig {
    /// Worst-case time for one lookup: every attempt times out and every
    /// gap between attempts is a full backoff.
    pub fn lookup_budget(&self) -> Duration {
        let attempts = u64::from(self.lookup_retries).saturating_add(1);
        let waiting = attempts.saturating_mul(self.store_timeout_ms);
        let backoff = u64::from(self.lookup_retries).saturating_mul(self.retry_backoff_ms);
        Duration::from_millis(waiting.saturating_add(backoff))
    }

    /// Rejects zero timeouts and intervals, and lookup budgets that could
    /// hold a request longer than [`MAX_LOOKUP_BUDGET_MS`].
    pub fn validate(&self) -> Result<(), AppError> {
        if self.store_timeout_ms == 0 {
            return Err(AppError::configuration(
                "revocation.store_timeout_ms must be positive",
            ));
        }
        if self.lookup_retries > MAX_LOOKUP_RETRIES {
            return Err(AppError::configuration(format!(
                "revocation.lookup_retries must not exceed {MAX_LOOKUP_RETRIES}"
            )));
        }
        if self.lookup_budget() > Duration::from_millis(MAX_LOOKUP_BUDGET_MS) {
            return Err(AppError::configuration(format!(
                "revocation lookup budget (store_timeout_ms and retries) exceeds {MAX_LOOKUP_BUDGET_MS} ms"
            )));
        }
        if self.cleanup_interval_seconds == 0 {
            return Err(AppError::configuration(
                "revocation.cleanup_interval_seconds must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            store_timeout_ms: default_store_timeout_ms(),
            lookup_retries: default_lookup_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

fn default_backend() -> RevocationBackend {
    RevocationBackend::Database
}

fn default_store_timeout_ms() -> u64 {
    250
}

fn default_lookup_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    25
}

fn default_cleanup_interval() -> u64 {
    3600
}
