//! `AuthUser` extractor: the subject attached by the auth middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};

use storefront_auth::Claims;
use storefront_core::error::AppError;

use crate::error::ApiError;

/// Authenticated subject available in handlers behind
/// [`require_auth`](crate::middleware::auth::require_auth).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// User id.
    pub subject_id: i64,
    /// Admin capability.
    pub privileged: bool,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.sub,
            privileged: claims.privileged,
            expires_at: claims.expires_at(),
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication required").into())
    }
}
