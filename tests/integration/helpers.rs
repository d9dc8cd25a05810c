//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::Value;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use storefront_api::AppState;
use storefront_auth::{
    CacheRevocationStore, Claims, RevocationCleanup, SessionAuthenticator, SessionLifecycle,
    TokenCodec,
};
use storefront_cache::memory::MemoryCacheProvider;
use storefront_core::config::cache::MemoryCacheConfig;
use storefront_core::config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, LoggingConfig, RevocationConfig,
    ServerConfig,
};
use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{RevocationStore, UserStore, VerifiedSubject};

pub const SECRET: &str = "integration-test-secret";
pub const SHOPPER: (&str, &str) = ("shopper@example.com", "correct horse");
pub const ADMIN: (&str, &str) = ("admin@example.com", "battery staple");
pub const SHOPPER_ID: i64 = 42;
pub const ADMIN_ID: i64 = 1;

/// Build a configuration that needs no external services.
pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused/storefront_test".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        cache: CacheConfig::default(),
        auth: AuthConfig {
            jwt_secret: SECRET.to_string(),
            token_ttl_hours: 1,
            header_name: "authorization".to_string(),
        },
        revocation: RevocationConfig {
            store_timeout_ms: 50,
            lookup_retries: 1,
            retry_backoff_ms: 5,
            ..RevocationConfig::default()
        },
        logging: LoggingConfig::default(),
    }
}

/// Two fixed accounts: a shopper and an admin.
#[derive(Debug)]
pub struct FixtureUsers;

#[async_trait]
impl UserStore for FixtureUsers {
    async fn verify_credentials(
        &self,
        identifier: &str,
        secret: &str,
    ) -> AppResult<Option<VerifiedSubject>> {
        let subject = match (identifier, secret) {
            s if s == SHOPPER => Some(VerifiedSubject {
                subject_id: SHOPPER_ID,
                privileged: false,
            }),
            s if s == ADMIN => Some(VerifiedSubject {
                subject_id: ADMIN_ID,
                privileged: true,
            }),
            _ => None,
        };
        Ok(subject)
    }
}

/// Revocation records kept in a vector, purged by expiry.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub records: Mutex<Vec<(String, i64, DateTime<Utc>)>>,
}

#[async_trait]
impl RevocationStore for RecordingStore {
    async fn record(
        &self,
        token: &str,
        subject_id: i64,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut records = self.records.lock().await;
        if !records.iter().any(|(t, _, _)| t == token) {
            records.push((token.to_string(), subject_id, expires_at));
        }
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> AppResult<Option<i64>> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .find(|(t, _, _)| t == token)
            .map(|(_, subject, _)| *subject))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|(_, _, expires_at)| *expires_at > now);
        Ok((before - records.len()) as u64)
    }
}

/// A store that never answers lookups in time.
#[derive(Debug)]
pub struct SlowStore;

#[async_trait]
impl RevocationStore for SlowStore {
    async fn record(&self, _: &str, _: i64, _: DateTime<Utc>) -> AppResult<()> {
        Ok(())
    }

    async fn is_revoked(&self, _: &str) -> AppResult<Option<i64>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(None)
    }

    async fn purge_expired(&self, _: DateTime<Utc>) -> AppResult<u64> {
        Ok(0)
    }
}

/// A store whose backend is down.
#[derive(Debug)]
pub struct FailingStore;

#[async_trait]
impl RevocationStore for FailingStore {
    async fn record(&self, _: &str, _: i64, _: DateTime<Utc>) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }

    async fn is_revoked(&self, _: &str) -> AppResult<Option<i64>> {
        Err(AppError::database("connection refused"))
    }

    async fn purge_expired(&self, _: DateTime<Utc>) -> AppResult<u64> {
        Err(AppError::database("connection refused"))
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Cancels in-flight authentication like a server shutdown
    pub shutdown: CancellationToken,
}

impl TestApp {
    /// App backed by the in-memory cache revocation store.
    pub fn new() -> Self {
        let cache = MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 1_000 });
        Self::with_store(Arc::new(CacheRevocationStore::new(Arc::new(cache))))
    }

    /// App backed by the given revocation store.
    pub fn with_store(store: Arc<dyn RevocationStore>) -> Self {
        let config = test_config();
        let codec = Arc::new(TokenCodec::new(&config.auth).expect("valid test auth config"));
        let authenticator = Arc::new(SessionAuthenticator::new(
            Arc::clone(&codec),
            Arc::clone(&store),
            &config.revocation,
        ));
        let lifecycle = Arc::new(SessionLifecycle::new(
            codec,
            Arc::new(FixtureUsers),
            Arc::clone(&store),
            &config.revocation,
        ));
        let cleanup = Arc::new(RevocationCleanup::new(store, &config.revocation));
        let shutdown = CancellationToken::new();

        let state = AppState {
            config: Arc::new(config.clone()),
            authenticator,
            lifecycle,
            cleanup,
            shutdown: shutdown.clone(),
        };

        Self {
            router: storefront_api::build_router(state),
            config,
            shutdown,
        }
    }

    /// Login and return the session token
    pub async fn login(&self, (identifier, password): (&str, &str)) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "identifier": identifier,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make an HTTP request with an optional raw `Authorization` header value
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// GET /api/auth/me with a bearer token
    pub async fn me(&self, token: &str) -> TestResponse {
        let header = format!("Bearer {token}");
        self.request("GET", "/api/auth/me", None, Some(&header)).await
    }

    /// POST /api/auth/logout with a bearer token
    pub async fn logout(&self, token: &str) -> TestResponse {
        let header = format!("Bearer {token}");
        self.request("POST", "/api/auth/logout", None, Some(&header))
            .await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Sign arbitrary claims with `secret`, bypassing issuance checks.
pub fn forge_token(claims: &Claims, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign test token")
}

/// Claims for `subject_id` expiring `offset_seconds` from now.
pub fn claims_expiring_in(subject_id: i64, privileged: bool, offset_seconds: i64) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        sub: subject_id,
        privileged,
        exp: now + offset_seconds,
        iat: now - 60,
        jti: uuid::Uuid::new_v4(),
    }
}

/// The exact body every denied request receives.
pub fn unauthorized_body() -> Value {
    serde_json::json!({
        "error": "UNAUTHORIZED",
        "message": "Authentication required",
    })
}
