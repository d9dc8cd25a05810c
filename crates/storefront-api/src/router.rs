//! Route definitions for the Storefront HTTP API.
//!
//! All routes are mounted under `/api`. Protected routes sit behind
//! [`require_auth`](crate::middleware::auth::require_auth); admin routes
//! additionally behind [`require_privileged`](crate::middleware::rbac::require_privileged).

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .merge(admin_routes(state.clone()));

    let cors = middleware::cors::build_cors_layer(
        &state.config.server.cors,
        &state.config.auth.header_name,
    );

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Endpoints reachable without a token.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/health", get(handlers::health::health))
}

/// Endpoints for any authenticated subject.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}

/// Admin-only endpoints.
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/revocations/purge",
            post(handlers::admin::purge_revocations),
        )
        .route_layer(axum_middleware::from_fn(
            middleware::rbac::require_privileged,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}
