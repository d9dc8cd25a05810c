//! Embedded schema migrations for the `users` and `revoked_tokens` tables.

use sqlx::migrate::Migrator;
use tracing::info;

use storefront_core::error::{AppError, ErrorKind};

use crate::connection::DatabasePool;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply any migrations the database has not seen yet.
pub async fn run_migrations(db: &DatabasePool) -> Result<(), AppError> {
    let known = MIGRATOR.iter().count();
    info!(known, "Applying schema migrations");

    MIGRATOR.run(db.pool()).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Schema migration failed: {e}"), e)
    })?;

    info!("Schema is up to date");
    Ok(())
}
