//! Token signing configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 366;

/// Session token configuration.
///
/// There is deliberately no default secret: an absent `jwt_secret`
/// deserializes to an empty string and is rejected by [`AuthConfig::validate`].
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime in hours.
    #[serde(default)]
    pub token_ttl_hours: u64,
    /// Request header carrying the session token.
    #[serde(default = "default_header_name")]
    pub header_name: String,
}

impl AuthConfig {
    /// Rejects a missing secret or a TTL outside `1..=MAX_TOKEN_TTL_HOURS`.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set to a non-empty value",
            ));
        }
        if self.token_ttl_hours == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_hours must be a positive integer",
            ));
        }
        if self.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_hours must not exceed {MAX_TOKEN_TTL_HOURS}"
            )));
        }
        if self.header_name.trim().is_empty() {
            return Err(AppError::configuration("auth.header_name must not be empty"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"****")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("header_name", &self.header_name)
            .finish()
    }
}

fn default_header_name() -> String {
    "authorization".to_string()
}
