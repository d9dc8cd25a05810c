//! Integration tests for login and per-request token authentication.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{
    ADMIN, ADMIN_ID, SECRET, SHOPPER, SHOPPER_ID, TestApp, claims_expiring_in, forge_token,
    unauthorized_body,
};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "identifier": SHOPPER.0,
                "password": SHOPPER.1,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.body["data"]["token"].is_string());
    assert_eq!(response.body["data"]["token_type"], "Bearer");
    assert!(response.body["data"]["expires_at"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "identifier": SHOPPER.0,
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid identifier or password");
}

#[tokio::test]
async fn test_login_unknown_user_is_indistinguishable() {
    let app = TestApp::new();

    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "identifier": "nobody@example.com",
                "password": SHOPPER.1,
            })),
            None,
        )
        .await;
    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "identifier": SHOPPER.0,
                "password": "nope",
            })),
            None,
        )
        .await;

    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body, wrong.body);
}

#[tokio::test]
async fn test_login_empty_identifier_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "identifier": "",
                "password": SHOPPER.1,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_me_with_token() {
    let app = TestApp::new();
    let token = app.login(SHOPPER).await;

    let response = app.me(&token).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["subject_id"], SHOPPER_ID);
    assert_eq!(response.body["data"]["privileged"], false);
}

#[tokio::test]
async fn test_me_prefix_is_optional_and_case_insensitive() {
    let app = TestApp::new();
    let token = app.login(SHOPPER).await;

    for header in [
        token.clone(),
        format!("bearer {token}"),
        format!("BEARER {token}"),
        format!("  Bearer   {token}  "),
    ] {
        let response = app
            .request("GET", "/api/auth/me", None, Some(&header))
            .await;
        assert_eq!(response.status, StatusCode::OK, "header: {header:?}");
    }
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, unauthorized_body());
}

#[tokio::test]
async fn test_me_with_blank_credential() {
    let app = TestApp::new();

    for header in ["", "   ", "Bearer", "Bearer    "] {
        let response = app
            .request("GET", "/api/auth/me", None, Some(header))
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "header: {header:?}");
        assert_eq!(response.body, unauthorized_body());
    }
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let app = TestApp::new();

    let response = app.me("not.a.token").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, unauthorized_body());
}

#[tokio::test]
async fn test_me_with_foreign_secret() {
    let app = TestApp::new();
    let token = forge_token(&claims_expiring_in(SHOPPER_ID, false, 600), "some-other-secret");

    let response = app.me(&token).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, unauthorized_body());
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let app = TestApp::new();
    let token = forge_token(&claims_expiring_in(SHOPPER_ID, false, -5), SECRET);

    let response = app.me(&token).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, unauthorized_body());
}

#[tokio::test]
async fn test_me_with_forged_privilege_is_rejected() {
    let app = TestApp::new();
    let token = app.login(SHOPPER).await;

    // Swap the payload for one claiming privilege, keeping the signature.
    let mut parts: Vec<&str> = token.split('.').collect();
    let forged_claims = forge_token(&claims_expiring_in(SHOPPER_ID, true, 600), "attacker");
    let forged_payload = forged_claims.split('.').nth(1).expect("payload segment");
    parts[1] = forged_payload;
    let tampered = parts.join(".");

    let response = app.me(&tampered).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_route_requires_privilege() {
    let app = TestApp::new();
    let token = app.login(SHOPPER).await;

    let response = app
        .request(
            "POST",
            "/api/admin/revocations/purge",
            None,
            Some(&format!("Bearer {token}")),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_route_requires_authentication_first() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/admin/revocations/purge", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, unauthorized_body());
}

#[tokio::test]
async fn test_admin_login_carries_privilege() {
    let app = TestApp::new();
    let token = app.login(ADMIN).await;

    let response = app.me(&token).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["subject_id"], ADMIN_ID);
    assert_eq!(response.body["data"]["privileged"], true);
}

#[tokio::test]
async fn test_shutdown_cancels_authentication() {
    let app = TestApp::new();
    let token = app.login(SHOPPER).await;
    app.shutdown.cancel();

    let response = app.me(&token).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, unauthorized_body());
}
