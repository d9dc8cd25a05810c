//! Session lifecycle: login issues a token, logout revokes it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use storefront_core::config::RevocationConfig;
use storefront_core::error::AppError;
use storefront_core::traits::{RevocationStore, UserStore};

use super::authenticator::credential_from;
use crate::error::AuthError;
use crate::token::{Claims, TokenCodec};

/// A freshly signed session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact signed token.
    pub token: String,
    /// Claims embedded in the token.
    pub claims: Claims,
}

impl IssuedToken {
    /// Expiration of the token.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }
}

/// Issues tokens at login and records revocations at logout.
#[derive(Debug, Clone)]
pub struct SessionLifecycle {
    codec: Arc<TokenCodec>,
    users: Arc<dyn UserStore>,
    revocations: Arc<dyn RevocationStore>,
    store_timeout: Duration,
}

impl SessionLifecycle {
    /// Creates a lifecycle manager.
    pub fn new(
        codec: Arc<TokenCodec>,
        users: Arc<dyn UserStore>,
        revocations: Arc<dyn RevocationStore>,
        config: &RevocationConfig,
    ) -> Self {
        Self {
            codec,
            users,
            revocations,
            store_timeout: Duration::from_millis(config.store_timeout_ms),
        }
    }

    /// Verifies credentials and issues a signed token.
    ///
    /// Unknown identifiers and wrong secrets fail identically.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<IssuedToken, AuthError> {
        let subject = self
            .users
            .verify_credentials(identifier, secret)
            .await
            .map_err(AuthError::Backend)?
            .ok_or_else(|| {
                warn!("Login rejected: invalid credentials");
                AuthError::InvalidCredentials
            })?;

        let claims = self.codec.issue(subject.subject_id, subject.privileged);
        let token = self.codec.encode(&claims).map_err(|e| {
            error!(subject_id = subject.subject_id, error = %e, "Failed to sign session token");
            e
        })?;

        info!(
            subject_id = claims.sub,
            privileged = claims.privileged,
            expires_at = %claims.expires_at(),
            "Login successful"
        );
        Ok(IssuedToken { token, claims })
    }

    /// Revokes the presented token until its own expiry.
    ///
    /// Idempotent: revoking an already revoked token succeeds. A correctly
    /// signed token that has already expired is accepted without a record.
    pub async fn logout(&self, raw: &str) -> Result<(), AuthError> {
        let token = credential_from(raw).ok_or(AuthError::Unauthorized)?;
        let claims = self.codec.decode(token).map_err(|e| {
            debug!(error = %e, "Logout with unverifiable token");
            AuthError::Unauthorized
        })?;

        if claims.is_expired_at(Utc::now().timestamp()) {
            debug!(subject_id = claims.sub, "Logout of already expired token");
            return Ok(());
        }

        let write = self
            .revocations
            .record(token, claims.sub, claims.expires_at());
        match tokio::time::timeout(self.store_timeout, write).await {
            Ok(Ok(())) => {
                info!(subject_id = claims.sub, "Session token revoked");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(subject_id = claims.sub, error = %e, "Failed to record revocation");
                Err(AuthError::Backend(e))
            }
            Err(_) => {
                error!(subject_id = claims.sub, "Revocation write timed out");
                Err(AuthError::Backend(AppError::service_unavailable(
                    "Revocation store timed out",
                )))
            }
        }
    }
}
