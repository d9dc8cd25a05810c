//! User repository implementation.

use sqlx::PgPool;

use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;

/// The columns needed to verify a login.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    /// Primary key.
    pub id: i64,
    /// Login identifier.
    pub email: String,
    /// Argon2id PHC hash string.
    pub password_hash: String,
    /// Whether the user holds the admin capability.
    pub is_admin: bool,
}

/// Repository for user lookups.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's credentials by email (case-insensitive).
    pub async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> AppResult<Option<UserCredentials>> {
        sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, password_hash, is_admin FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
        })
    }
}
