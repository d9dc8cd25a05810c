//! Authentication error types.

use thiserror::Error;

use storefront_core::error::AppError;

/// Failures raised by token issuance, login, and logout.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Signing configuration is unusable; fatal at startup.
    #[error("token configuration error: {0}")]
    Configuration(String),
    /// Claims violate issuance invariants or could not be signed.
    #[error("failed to sign token: {0}")]
    Signing(String),
    /// The token is malformed, mis-signed, or carries invalid claims.
    #[error("invalid token: {0}")]
    InvalidToken(String),
    /// Unknown identifier or wrong secret. The two are not distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Logout was attempted without a verifiable token.
    #[error("unauthorized")]
    Unauthorized,
    /// A collaborator (user store, revocation store) failed.
    #[error("backend failure: {0}")]
    Backend(#[source] AppError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Configuration(msg) => AppError::configuration(msg),
            AuthError::Signing(msg) => AppError::internal(format!("Token signing failed: {msg}")),
            AuthError::InvalidToken(_) | AuthError::Unauthorized => {
                AppError::unauthorized("Authentication required")
            }
            AuthError::InvalidCredentials => AppError::unauthorized("Invalid identifier or password"),
            AuthError::Backend(inner) => inner,
        }
    }
}

/// Why a request was denied. Clients never see the distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DenyReason {
    /// No token, or only a scheme prefix.
    #[error("missing credential")]
    MissingCredential,
    /// Malformed, mis-signed, or carrying invalid claims.
    #[error("invalid token")]
    InvalidToken,
    /// Correctly signed but past its expiry.
    #[error("token expired")]
    Expired,
    /// Explicitly revoked at logout.
    #[error("token revoked")]
    Revoked,
    /// The revocation store did not answer within the lookup budget.
    #[error("revocation store unavailable")]
    StoreUnavailable,
    /// The caller gave up before a decision was reached.
    #[error("authentication canceled")]
    Canceled,
}

impl DenyReason {
    /// Stable reason code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::InvalidToken => "invalid_token",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
            Self::StoreUnavailable => "store_unavailable",
            Self::Canceled => "canceled",
        }
    }
}

impl From<DenyReason> for AppError {
    fn from(_: DenyReason) -> Self {
        AppError::unauthorized("Authentication required")
    }
}
