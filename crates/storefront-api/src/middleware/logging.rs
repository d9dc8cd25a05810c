//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, info};

/// Logs one line per request. The credential header is never logged.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;
    match status {
        s if s.is_server_error() => error!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            duration_ms,
            "HTTP request failed"
        ),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            "HTTP request denied"
        ),
        _ => info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            "HTTP request"
        ),
    }

    response
}
