//! Storefront Server: session authentication for the storefront API
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt};

use storefront_api::AppState;
use storefront_auth::{
    CacheRevocationStore, DatabaseRevocationStore, DatabaseUserStore, PasswordHasher,
    RevocationCleanup, SessionAuthenticator, SessionLifecycle, TokenCodec,
};
use storefront_cache::CacheManager;
use storefront_core::config::{AppConfig, RevocationBackend};
use storefront_core::error::AppError;
use storefront_core::traits::RevocationStore;
use storefront_database::DatabasePool;
use storefront_database::repositories::{RevocationRepository, UserRepository};

#[tokio::main]
async fn main() {
    let env = std::env::var("STOREFRONT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration (env: {}): {}", env, e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Storefront v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    storefront_database::migration::run_migrations(&db).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Revocation store ─────────────────────────────────
    let revocations: Arc<dyn RevocationStore> = match config.revocation.backend {
        RevocationBackend::Database => {
            tracing::info!("Revocation records stored in the database");
            Arc::new(DatabaseRevocationStore::new(RevocationRepository::new(
                db.pool().clone(),
            )))
        }
        RevocationBackend::Cache => {
            tracing::info!(
                "Revocation records stored in cache (provider: {})",
                config.cache.provider
            );
            let cache = CacheManager::new(&config.cache).await?;
            Arc::new(CacheRevocationStore::new(Arc::new(cache)))
        }
    };

    // ── Step 3: Auth system ──────────────────────────────────────
    tracing::info!("Initializing authentication system...");
    let codec = Arc::new(TokenCodec::new(&config.auth).map_err(AppError::from)?);
    let users = Arc::new(DatabaseUserStore::new(
        UserRepository::new(db.pool().clone()),
        Arc::new(PasswordHasher::new()),
    ));
    let authenticator = Arc::new(SessionAuthenticator::new(
        Arc::clone(&codec),
        Arc::clone(&revocations),
        &config.revocation,
    ));
    let lifecycle = Arc::new(SessionLifecycle::new(
        codec,
        users,
        Arc::clone(&revocations),
        &config.revocation,
    ));
    let cleanup = Arc::new(RevocationCleanup::new(revocations, &config.revocation));

    // ── Step 4: Background cleanup ───────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let cancel = CancellationToken::new();

    let cleanup_task = Arc::clone(&cleanup);
    let cleanup_handle = tokio::spawn(async move {
        cleanup_task.run(shutdown_rx).await;
    });

    // ── Step 5: Build and start HTTP server ──────────────────────
    let state = AppState {
        config: Arc::new(config.clone()),
        authenticator,
        lifecycle,
        cleanup,
        shutdown: cancel.clone(),
    };
    let app = storefront_api::build_router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!("Storefront server listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        cancel.cancel();
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    if tokio::time::timeout(grace, cleanup_handle).await.is_err() {
        tracing::warn!("Revocation cleanup did not stop within {:?}", grace);
    }
    db.close().await;

    tracing::info!("Storefront server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
