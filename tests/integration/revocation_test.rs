//! Integration tests for logout, revocation lookup and expired-record purge.

mod helpers;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use chrono::Utc;

use storefront_core::traits::RevocationStore;

use helpers::{
    ADMIN, ADMIN_ID, FailingStore, RecordingStore, SECRET, SHOPPER, SHOPPER_ID, SlowStore,
    TestApp, claims_expiring_in, forge_token, unauthorized_body,
};

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new();
    let token = app.login(SHOPPER).await;
    assert_eq!(app.me(&token).await.status, StatusCode::OK);

    let response = app.logout(&token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);

    let response = app.me(&token).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, unauthorized_body());
}

#[tokio::test]
async fn test_logout_leaves_other_sessions_valid() {
    let app = TestApp::new();
    let first = app.login(SHOPPER).await;
    let second = app.login(SHOPPER).await;
    assert_ne!(first, second);

    app.logout(&first).await;

    assert_eq!(app.me(&first).await.status, StatusCode::UNAUTHORIZED);
    let response = app.me(&second).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["subject_id"], SHOPPER_ID);
}

#[tokio::test]
async fn test_double_logout_is_idempotent() {
    let store = Arc::new(RecordingStore::default());
    let app = TestApp::with_store(store.clone());
    let token = app.login(SHOPPER).await;

    assert_eq!(app.logout(&token).await.status, StatusCode::OK);
    assert_eq!(app.logout(&token).await.status, StatusCode::OK);

    assert_eq!(store.records.lock().await.len(), 1);
}

#[tokio::test]
async fn test_logout_with_invalid_token() {
    let app = TestApp::new();

    let response = app.logout("garbage").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_of_expired_token_writes_nothing() {
    let store = Arc::new(RecordingStore::default());
    let app = TestApp::with_store(store.clone());
    let token = forge_token(&claims_expiring_in(SHOPPER_ID, false, -5), SECRET);

    let response = app.logout(&token).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(store.records.lock().await.is_empty());
}

#[tokio::test]
async fn test_slow_store_fails_closed_within_bound() {
    let app = TestApp::with_store(Arc::new(SlowStore));
    let token = app.login(SHOPPER).await;

    let started = Instant::now();
    let response = app.me(&token).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, unauthorized_body());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_failing_store_fails_closed() {
    let app = TestApp::with_store(Arc::new(FailingStore));
    let token = app.login(SHOPPER).await;

    let response = app.me(&token).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, unauthorized_body());

    // Logout cannot guarantee revocation, so it reports failure.
    let response = app.logout(&token).await;
    assert!(response.status.is_server_error());
}

#[tokio::test]
async fn test_admin_purge_removes_expired_records() {
    let store = Arc::new(RecordingStore::default());
    let app = TestApp::with_store(store.clone());

    let now = Utc::now();
    store
        .record("stale", SHOPPER_ID, now - chrono::Duration::minutes(5))
        .await
        .unwrap();
    store
        .record("live", SHOPPER_ID, now + chrono::Duration::hours(1))
        .await
        .unwrap();

    let token = app.login(ADMIN).await;
    let response = app
        .request(
            "POST",
            "/api/admin/revocations/purge",
            None,
            Some(&format!("Bearer {token}")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["count"], 1);
    assert_eq!(store.is_revoked("live").await.unwrap(), Some(SHOPPER_ID));
    assert_eq!(store.is_revoked("stale").await.unwrap(), None);
}

#[tokio::test]
async fn test_revoked_admin_cannot_purge() {
    let app = TestApp::new();
    let token = app.login(ADMIN).await;
    app.logout(&token).await;

    let response = app
        .request(
            "POST",
            "/api/admin/revocations/purge",
            None,
            Some(&format!("Bearer {token}")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejected_admin_tokens_never_reach_purge() {
    let store = Arc::new(RecordingStore::default());
    let app = TestApp::with_store(store.clone());
    store
        .record("stale", SHOPPER_ID, Utc::now() - chrono::Duration::minutes(5))
        .await
        .unwrap();

    let revoked = app.login(ADMIN).await;
    app.logout(&revoked).await;
    let forged = forge_token(&claims_expiring_in(ADMIN_ID, true, 600), "not-the-secret");
    let expired = forge_token(&claims_expiring_in(ADMIN_ID, true, -5), SECRET);

    for token in [revoked, forged, expired] {
        let response = app
            .request(
                "POST",
                "/api/admin/revocations/purge",
                None,
                Some(&format!("Bearer {token}")),
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, unauthorized_body());
    }

    assert_eq!(store.is_revoked("stale").await.unwrap(), Some(SHOPPER_ID));
}
