//! Capability guards for privileged routes.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use storefront_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::AuthUser;

/// Checks that the authenticated user holds the admin capability.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.privileged {
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(())
}

/// Middleware form of [`require_admin`]; must run after
/// [`require_auth`](super::auth::require_auth).
pub async fn require_privileged(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;
    require_admin(auth)?;
    Ok(next.run(request).await)
}
