//! Auth handlers: login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use validator::Validate;

use storefront_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let issued = state.lifecycle.login(&req.identifier, &req.password).await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        expires_at: issued.expires_at(),
        token: issued.token,
        token_type: "Bearer".to_string(),
    })))
}

/// POST /api/auth/logout
///
/// Not behind the auth middleware: a token that is already revoked can be
/// logged out again.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let raw = headers
        .get(state.config.auth.header_name.as_str())
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    state.lifecycle.logout(raw).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out successfully".to_string(),
    })))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<SessionResponse>> {
    Json(ApiResponse::ok(SessionResponse {
        subject_id: auth.subject_id,
        privileged: auth.privileged,
        expires_at: auth.expires_at,
    }))
}
