//! Token authentication middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use storefront_auth::DenyReason;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Rejects requests whose token does not authenticate.
///
/// On success the subject is attached to the request extensions as
/// [`AuthUser`]. On any denial the wrapped handler is not invoked and the
/// client receives a uniform 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header_name = state.config.auth.header_name.as_str();
    let raw = match request.headers().get(header_name) {
        None => String::new(),
        Some(value) => match value.to_str() {
            Ok(value) => value.to_owned(),
            Err(_) => {
                warn!(
                    reason = DenyReason::InvalidToken.code(),
                    "Non-UTF-8 credential header"
                );
                return ApiError::from(DenyReason::InvalidToken).into_response();
            }
        },
    };

    match state
        .authenticator
        .authenticate_until_cancelled(&raw, &state.shutdown)
        .await
    {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser::from(claims));
            next.run(request).await
        }
        Err(reason) => ApiError::from(reason).into_response(),
    }
}
