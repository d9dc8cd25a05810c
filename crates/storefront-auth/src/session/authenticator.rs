//! Per-request token authentication.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use storefront_core::config::RevocationConfig;
use storefront_core::config::revocation::MAX_LOOKUP_BUDGET_MS;
use storefront_core::traits::RevocationStore;

use crate::error::DenyReason;
use crate::token::{Claims, TokenCodec};

/// Extracts the credential from a raw header value.
///
/// Trims whitespace and strips a case-insensitive `Bearer` scheme. Returns
/// `None` when nothing is left.
pub fn credential_from(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let credential = match trimmed.get(..6) {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer") => {
            let rest = &trimmed[6..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest.trim_start()
            } else {
                trimmed
            }
        }
        _ => trimmed,
    };
    (!credential.is_empty()).then_some(credential)
}

/// Composes token verification with the revocation lookup.
///
/// A token is accepted only when it is correctly signed, unexpired, and
/// positively known not to be revoked. Any store failure, timeout, or
/// cancellation denies.
#[derive(Debug, Clone)]
pub struct SessionAuthenticator {
    codec: Arc<TokenCodec>,
    store: Arc<dyn RevocationStore>,
    timeout: Duration,
    retries: u32,
    backoff: Duration,
    budget: Duration,
}

impl SessionAuthenticator {
    /// Creates an authenticator with the configured lookup budget.
    pub fn new(
        codec: Arc<TokenCodec>,
        store: Arc<dyn RevocationStore>,
        config: &RevocationConfig,
    ) -> Self {
        Self {
            codec,
            store,
            timeout: Duration::from_millis(config.store_timeout_ms),
            retries: config.lookup_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
            budget: config
                .lookup_budget()
                .min(Duration::from_millis(MAX_LOOKUP_BUDGET_MS)),
        }
    }

    /// Decides whether the raw header value grants access.
    pub async fn authenticate(&self, raw: &str) -> Result<Claims, DenyReason> {
        let outcome = self.decide(raw).await;
        if let Err(reason) = &outcome {
            log_denial(*reason);
        }
        outcome
    }

    /// Like [`SessionAuthenticator::authenticate`], but gives up with
    /// [`DenyReason::Canceled`] as soon as `cancel` fires.
    pub async fn authenticate_until_cancelled(
        &self,
        raw: &str,
        cancel: &CancellationToken,
    ) -> Result<Claims, DenyReason> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log_denial(DenyReason::Canceled);
                Err(DenyReason::Canceled)
            }
            outcome = self.authenticate(raw) => outcome,
        }
    }

    async fn decide(&self, raw: &str) -> Result<Claims, DenyReason> {
        let token = credential_from(raw).ok_or(DenyReason::MissingCredential)?;

        let claims = self.codec.decode(token).map_err(|e| {
            debug!(error = %e, "Token verification failed");
            DenyReason::InvalidToken
        })?;

        if claims.is_expired_at(Utc::now().timestamp()) {
            return Err(DenyReason::Expired);
        }

        match self.lookup(token).await? {
            Some(revoked_subject) => {
                debug!(subject_id = revoked_subject, "Token found in revocation store");
                Err(DenyReason::Revoked)
            }
            None => Ok(claims),
        }
    }

    /// Bounded revocation lookup: each attempt is timed out, failures are
    /// retried with a fixed backoff, and the whole sequence is capped by the
    /// lookup budget. Exhaustion denies.
    async fn lookup(&self, token: &str) -> Result<Option<i64>, DenyReason> {
        match tokio::time::timeout(self.budget, self.lookup_attempts(token)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    budget_ms = self.budget.as_millis() as u64,
                    "Revocation lookup budget exhausted"
                );
                Err(DenyReason::StoreUnavailable)
            }
        }
    }

    async fn lookup_attempts(&self, token: &str) -> Result<Option<i64>, DenyReason> {
        let attempts = self.retries.saturating_add(1);
        for attempt in 1..=attempts {
            match tokio::time::timeout(self.timeout, self.store.is_revoked(token)).await {
                Ok(Ok(found)) => return Ok(found),
                Ok(Err(e)) => {
                    warn!(attempt, attempts, error = %e, "Revocation lookup failed");
                }
                Err(_) => {
                    warn!(
                        attempt,
                        attempts,
                        timeout_ms = self.timeout.as_millis() as u64,
                        "Revocation lookup timed out"
                    );
                }
            }
            if attempt < attempts {
                tokio::time::sleep(self.backoff).await;
            }
        }
        Err(DenyReason::StoreUnavailable)
    }
}

fn log_denial(reason: DenyReason) {
    let code = reason.code();
    match reason {
        DenyReason::MissingCredential | DenyReason::Expired | DenyReason::Canceled => {
            debug!(reason = code, "Authentication denied");
        }
        DenyReason::InvalidToken => warn!(reason = code, "Authentication denied"),
        DenyReason::Revoked => info!(reason = code, "Authentication denied"),
        DenyReason::StoreUnavailable => {
            error!(reason = code, "Authentication denied: revocation store unavailable");
        }
    }
}
