//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use storefront_auth::{RevocationCleanup, SessionAuthenticator, SessionLifecycle};
use storefront_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Per-request token authentication
    pub authenticator: Arc<SessionAuthenticator>,
    /// Login and logout
    pub lifecycle: Arc<SessionLifecycle>,
    /// Expired revocation purge, also exposed to admins
    pub cleanup: Arc<RevocationCleanup>,
    /// Fires when the server begins shutting down
    pub shutdown: CancellationToken,
}
