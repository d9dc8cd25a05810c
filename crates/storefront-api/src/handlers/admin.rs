//! Admin-only handlers.

use axum::Json;
use axum::extract::State;
use tracing::info;

use crate::dto::response::{ApiResponse, CountResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/admin/revocations/purge
pub async fn purge_revocations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.cleanup.run_cleanup().await?;
    info!(subject_id = auth.subject_id, count, "Manual revocation purge");
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}
