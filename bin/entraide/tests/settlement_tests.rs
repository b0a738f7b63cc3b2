mod common;

use axum_test::TestServer;
use common::fixtures::unique_email;
use common::helpers::{end_session, setup_accepted_session};
use common::{create_test_app, create_test_app_state, create_test_user, promote_to_admin};
use diesel::prelude::*;
use http::StatusCode;
use serde_json::json;
use serial_test::serial;

async fn wallet_balance(server: &TestServer, token: &str) -> i64 {
    let response = server
        .get("/api/wallet")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    body["balance_cents"].as_i64().unwrap()
}

#[tokio::test]
#[serial]
async fn test_settle_splits_price_and_credits_provider() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (demandeur_token, _) = create_test_user(&server, &unique_email("payer")).await;
    let (offreur_token, _) = create_test_user(&server, &unique_email("provider")).await;

    let (_, _, session_id) =
        setup_accepted_session(&server, &demandeur_token, &offreur_token, 10_000, 60).await;
    end_session(&server, &demandeur_token, &session_id).await;

    let response = server
        .post(format!("/api/sessions/{}/settle", session_id).as_str())
        .add_header("Authorization", format!("Bearer {}", demandeur_token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_cents"], 10_000);
    assert_eq!(body["commission_rate"], 10);
    assert_eq!(body["commission_cents"], 1_000);
    assert_eq!(body["provider_cents"], 9_000);
    assert_eq!(body["already_exists"], false);

    assert_eq!(wallet_balance(&server, &offreur_token).await, 9_000);
    assert_eq!(wallet_balance(&server, &demandeur_token).await, 0);
}

#[tokio::test]
#[serial]
async fn test_settle_is_idempotent() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (demandeur_token, _) = create_test_user(&server, &unique_email("payer2")).await;
    let (offreur_token, _) = create_test_user(&server, &unique_email("provider2")).await;

    let (_, _, session_id) =
        setup_accepted_session(&server, &demandeur_token, &offreur_token, 10_000, 60).await;
    end_session(&server, &offreur_token, &session_id).await;

    let first = server
        .post(format!("/api/sessions/{}/settle", session_id).as_str())
        .add_header("Authorization", format!("Bearer {}", offreur_token))
        .await;
    first.assert_status_ok();
    let first_body: serde_json::Value = first.json();

    let second = server
        .post(format!("/api/sessions/{}/settle", session_id).as_str())
        .add_header("Authorization", format!("Bearer {}", demandeur_token))
        .await;
    second.assert_status_ok();
    let second_body: serde_json::Value = second.json();

    assert_eq!(second_body["already_exists"], true);
    assert_eq!(second_body["transaction_id"], first_body["transaction_id"]);

    // Credited exactly once
    assert_eq!(wallet_balance(&server, &offreur_token).await, 9_000);
}

#[tokio::test]
#[serial]
async fn test_concurrent_settles_credit_once() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let (demandeur_token, _) = create_test_user(&server, &unique_email("racer_d")).await;
    let (offreur_token, offreur_id) = create_test_user(&server, &unique_email("racer_o")).await;

    let (_, _, session_id) =
        setup_accepted_session(&server, &demandeur_token, &offreur_token, 10_000, 60).await;
    end_session(&server, &demandeur_token, &session_id).await;

    let path = format!("/api/sessions/{}/settle", session_id);
    let (a, b) = tokio::join!(
        server
            .post(path.as_str())
            .add_header("Authorization", format!("Bearer {}", demandeur_token)),
        server
            .post(path.as_str())
            .add_header("Authorization", format!("Bearer {}", offreur_token)),
    );

    a.assert_status_ok();
    b.assert_status_ok();
    let a_body: serde_json::Value = a.json();
    let b_body: serde_json::Value = b.json();
    let fresh_settles = [&a_body, &b_body]
        .iter()
        .filter(|body| body["already_exists"] == false)
        .count();
    assert_eq!(fresh_settles, 1);

    assert_eq!(wallet_balance(&server, &offreur_token).await, 9_000);

    // One ledger row for the session
    let mut conn = state.db.get().unwrap();
    use entraide_primitives::schema::transactions;
    let count: i64 = transactions::table
        .filter(transactions::offreur_id.eq(uuid::Uuid::parse_str(&offreur_id).unwrap()))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[serial]
async fn test_settle_requires_a_completed_session() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (demandeur_token, _) = create_test_user(&server, &unique_email("early_d")).await;
    let (offreur_token, _) = create_test_user(&server, &unique_email("early_o")).await;

    let (_, _, session_id) =
        setup_accepted_session(&server, &demandeur_token, &offreur_token, 5_000, 30).await;

    // Still active
    let response = server
        .post(format!("/api/sessions/{}/settle", session_id).as_str())
        .add_header("Authorization", format!("Bearer {}", demandeur_token))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn test_settlement_uses_the_current_commission_rate() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let admin_email = unique_email("admin");
    let (admin_token, _) = create_test_user(&server, &admin_email).await;
    {
        let mut conn = state.db.get().unwrap();
        promote_to_admin(&mut conn, &admin_email);
    }

    let update = server
        .put("/api/admin/settings")
        .add_header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "key": "commission_rate", "value": "20" }))
        .await;
    update.assert_status_ok();

    let (demandeur_token, _) = create_test_user(&server, &unique_email("rate_d")).await;
    let (offreur_token, _) = create_test_user(&server, &unique_email("rate_o")).await;

    let (_, _, session_id) =
        setup_accepted_session(&server, &demandeur_token, &offreur_token, 10_000, 60).await;
    end_session(&server, &demandeur_token, &session_id).await;

    let response = server
        .post(format!("/api/sessions/{}/settle", session_id).as_str())
        .add_header("Authorization", format!("Bearer {}", demandeur_token))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["commission_rate"], 20);
    assert_eq!(body["commission_cents"], 2_000);
    assert_eq!(body["provider_cents"], 8_000);

    // Restore the default so later tests in this binary see 10%
    let restore = server
        .put("/api/admin/settings")
        .add_header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "key": "commission_rate", "value": "10" }))
        .await;
    restore.assert_status_ok();
}
