//! HS256 session token encoding and verification.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use storefront_core::config::AuthConfig;

use super::claims::Claims;
use crate::error::AuthError;

/// Key material derived once from the configured secret.
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Encodes claims into signed compact tokens and verifies them back.
///
/// `decode` checks structure, algorithm, signature, and claim types only.
/// Expiry is judged by the caller against its own clock.
#[derive(Clone)]
pub struct TokenCodec {
    keys: Arc<Keys>,
    validation: Validation,
    ttl: TimeDelta,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Builds a codec from validated auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        config
            .validate()
            .map_err(|e| AuthError::Configuration(e.message))?;

        let ttl = i64::try_from(config.token_ttl_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| {
                AuthError::Configuration("auth.token_ttl_hours is out of range".to_string())
            })?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let secret = config.jwt_secret.as_bytes();
        Ok(Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
            validation,
            ttl,
        })
    }

    /// Token lifetime applied by [`TokenCodec::issue`].
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Builds fresh claims for a subject, expiring one TTL from now.
    pub fn issue(&self, subject_id: i64, privileged: bool) -> Claims {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Claims {
            sub: subject_id,
            privileged,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    /// Signs claims into a compact `header.payload.signature` token.
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        if claims.sub <= 0 {
            return Err(AuthError::Signing(format!(
                "subject id must be positive, got {}",
                claims.sub
            )));
        }
        if claims.is_expired_at(Utc::now().timestamp()) {
            return Err(AuthError::Signing(
                "expiry must be in the future".to_string(),
            ));
        }

        encode(&Header::new(Algorithm::HS256), claims, &self.keys.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verifies a token and returns its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &self.validation).map_err(|e| {
            let detail = match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => "signature mismatch",
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => "algorithm not accepted",
                jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => "missing claim",
                jsonwebtoken::errors::ErrorKind::Json(_) => "malformed claims",
                _ => "malformed token",
            };
            AuthError::InvalidToken(detail.to_string())
        })?;

        let claims = data.claims;
        if claims.sub <= 0 {
            return Err(AuthError::InvalidToken(
                "subject id must be positive".to_string(),
            ));
        }
        Ok(claims)
    }
}
