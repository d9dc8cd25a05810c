//! Periodic purge of expired revocation records.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time;
use tracing::{debug, error, info};

use storefront_core::config::RevocationConfig;
use storefront_core::error::AppError;
use storefront_core::traits::RevocationStore;

/// Removes revocation records whose token has expired on its own.
///
/// Runs off the request path; a failed cycle is logged and retried on the
/// next tick.
#[derive(Debug, Clone)]
pub struct RevocationCleanup {
    store: Arc<dyn RevocationStore>,
    interval: Duration,
}

impl RevocationCleanup {
    /// Creates a cleanup handler with the configured interval.
    pub fn new(store: Arc<dyn RevocationStore>, config: &RevocationConfig) -> Self {
        Self {
            store,
            interval: Duration::from_secs(config.cleanup_interval_seconds),
        }
    }

    /// Runs one cleanup cycle. Returns the number of records removed.
    pub async fn run_cleanup(&self) -> Result<u64, AppError> {
        let count = self.store.purge_expired(Utc::now()).await?;
        if count > 0 {
            info!(count, "Purged expired revocation records");
        } else {
            debug!("No expired revocation records to purge");
        }
        Ok(count)
    }

    /// Runs cleanup cycles until the shutdown signal flips to `true`.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_seconds = self.interval.as_secs(),
            "Revocation cleanup started"
        );

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.run_cleanup().await {
                        error!(error = %e, "Revocation cleanup failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Revocation cleanup shutting down");
                        break;
                    }
                }
            }
        }
    }
}
