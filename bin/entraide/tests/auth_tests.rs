mod common;

use axum_test::TestServer;
use common::fixtures::unique_email;
use common::{create_test_app, create_test_app_state, create_test_user};
use entraide_core::SecurityConfig;
use http::StatusCode;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_create_and_verify_token() {
    let state = create_test_app_state();
    let user_id = uuid::Uuid::new_v4().to_string();

    let token = SecurityConfig::create_token(&state, &user_id).expect("Failed to create token");
    assert!(!token.is_empty());

    let claims = SecurityConfig::verify_token(&state, &token).expect("Failed to verify token");
    assert_eq!(claims.sub, user_id);
    assert!(claims.exp > claims.iat);
    assert!(!claims.jti.is_empty());
}

#[tokio::test]
#[serial]
async fn test_invalid_token_rejected() {
    let state = create_test_app_state();

    let result = SecurityConfig::verify_token(&state, "invalid.token.here");
    assert!(result.is_err());
}

#[tokio::test]
#[serial]
async fn test_register_returns_tokens_and_user() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let email = unique_email("register");
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": email,
            "password": "SecurePass123!",
            "display_name": "Alice Martin"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert!(!body["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], email.to_lowercase());
    assert_eq!(body["user"]["wallet_balance_cents"], 0);
    // The hash must never leave the server
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
#[serial]
async fn test_register_duplicate_email_conflicts() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let email = unique_email("dup");
    create_test_user(&server, &email).await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": email,
            "password": "SecurePass123!",
            "display_name": "Alice Again"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn test_login_roundtrip_and_wrong_password() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let email = unique_email("login");
    create_test_user(&server, &email).await;

    let ok = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "SecurePass123!" }))
        .await;
    ok.assert_status_ok();
    let body: serde_json::Value = ok.json();
    assert!(!body["token"].as_str().unwrap().is_empty());

    let bad = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "WrongPass123!" }))
        .await;
    bad.assert_status(StatusCode::UNAUTHORIZED);

    let unknown = server
        .post("/api/auth/login")
        .json(&json!({ "email": unique_email("ghost"), "password": "SecurePass123!" }))
        .await;
    unknown.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_refresh_rotates_the_token() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let email = unique_email("refresh");
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": email,
            "password": "SecurePass123!",
            "display_name": "Refresh Tester"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    let refreshed = server
        .post("/api/auth/refresh")
        .json(&json!({ "refresh_token": refresh_token }))
        .await;
    refreshed.assert_status_ok();
    let refreshed_body: serde_json::Value = refreshed.json();
    assert!(!refreshed_body["token"].as_str().unwrap().is_empty());
    assert_ne!(refreshed_body["refresh_token"], body["refresh_token"]);

    // The old refresh token was revoked by the rotation
    let replayed = server
        .post("/api/auth/refresh")
        .json(&json!({ "refresh_token": body["refresh_token"] }))
        .await;
    replayed.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_me_requires_auth() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let anonymous = server.get("/api/me").await;
    anonymous.assert_status(StatusCode::UNAUTHORIZED);

    let email = unique_email("me");
    let (token, user_id) = create_test_user(&server, &email).await;

    let me = server
        .get("/api/me")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    me.assert_status_ok();
    let body: serde_json::Value = me.json();
    assert_eq!(body["id"], user_id.as_str());
    assert_eq!(body["email"], email.to_lowercase());
}

#[tokio::test]
#[serial]
async fn test_logout_blacklists_the_access_token() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let email = unique_email("logout");
    let (token, _) = create_test_user(&server, &email).await;

    let logout = server
        .post("/api/auth/logout")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    logout.assert_status_ok();

    let after = server
        .get("/api/me")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    after.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_update_profile_and_delete_account() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let email = unique_email("profile");
    let (token, _) = create_test_user(&server, &email).await;

    let updated = server
        .patch("/api/me")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "display_name": "New Name",
            "bank_account": {
                "iban": "FR7630006000011234567890189",
                "bic": "BNPAFRPP",
                "holder_name": "New Name"
            }
        }))
        .await;
    updated.assert_status_ok();
    let body: serde_json::Value = updated.json();
    assert_eq!(body["display_name"], "New Name");

    let deleted = server
        .delete("/api/me")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    deleted.assert_status(StatusCode::NO_CONTENT);

    let after = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "SecurePass123!" }))
        .await;
    after.assert_status(StatusCode::UNAUTHORIZED);
}
