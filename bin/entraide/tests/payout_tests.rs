mod common;

use axum_test::TestServer;
use common::fixtures::unique_email;
use common::helpers::{end_session, setup_accepted_session};
use common::{create_test_app, create_test_app_state, create_test_user, promote_to_admin};
use http::StatusCode;
use serde_json::json;
use serial_test::serial;

/// Earn `price * 90%` cents by running one session through settlement,
/// then save bank details so payouts are possible.
async fn earn_and_add_bank(server: &TestServer, offreur_token: &str, price_cents: i64) {
    let (demandeur_token, _) = create_test_user(server, &unique_email("sponsor")).await;
    let (_, _, session_id) =
        setup_accepted_session(server, &demandeur_token, offreur_token, price_cents, 60).await;
    end_session(server, &demandeur_token, &session_id).await;

    let settle = server
        .post(format!("/api/sessions/{}/settle", session_id).as_str())
        .add_header("Authorization", format!("Bearer {}", offreur_token))
        .await;
    settle.assert_status_ok();

    let profile = server
        .patch("/api/me")
        .add_header("Authorization", format!("Bearer {}", offreur_token))
        .json(&json!({
            "bank_account": {
                "iban": "FR7630006000011234567890189",
                "bic": "BNPAFRPP",
                "holder_name": "Test Provider"
            }
        }))
        .await;
    profile.assert_status_ok();
}

#[tokio::test]
#[serial]
async fn test_payout_requires_bank_details() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (token, _) = create_test_user(&server, &unique_email("no_bank")).await;

    let response = server
        .post("/api/wallet/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "amount_cents": 5_000 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_payout_enforces_minimum_and_balance() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (token, _) = create_test_user(&server, &unique_email("limits")).await;
    earn_and_add_bank(&server, &token, 10_000).await; // balance 9000

    let below_minimum = server
        .post("/api/wallet/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "amount_cents": 500 }))
        .await;
    below_minimum.assert_status(StatusCode::BAD_REQUEST);

    let too_much = server
        .post("/api/wallet/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "amount_cents": 20_000 }))
        .await;
    too_much.assert_status(StatusCode::PAYMENT_REQUIRED);

    // Neither refusal touched the balance
    let wallet = server
        .get("/api/wallet")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    let wallet_body: serde_json::Value = wallet.json();
    assert_eq!(wallet_body["balance_cents"], 9_000);
    assert_eq!(wallet_body["pending_payout_cents"], 0);
}

#[tokio::test]
#[serial]
async fn test_payout_debits_immediately_and_snapshots_bank() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (token, _) = create_test_user(&server, &unique_email("requester")).await;
    earn_and_add_bank(&server, &token, 10_000).await; // balance 9000

    let response = server
        .post("/api/wallet/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "amount_cents": 4_000 }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "pending");
    assert_eq!(body["amount_cents"], 4_000);
    assert_eq!(
        body["bank_account"]["iban"],
        "FR7630006000011234567890189"
    );

    let wallet = server
        .get("/api/wallet")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    let wallet_body: serde_json::Value = wallet.json();
    assert_eq!(wallet_body["balance_cents"], 5_000);
    assert_eq!(wallet_body["pending_payout_cents"], 4_000);

    let listed = server
        .get("/api/wallet/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    listed.assert_status_ok();
    let listed_body: serde_json::Value = listed.json();
    assert_eq!(listed_body.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_admin_completes_a_payout() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let admin_email = unique_email("payout_admin");
    let (admin_token, _) = create_test_user(&server, &admin_email).await;
    {
        let mut conn = state.db.get().unwrap();
        promote_to_admin(&mut conn, &admin_email);
    }

    let (token, _) = create_test_user(&server, &unique_email("paid_out")).await;
    earn_and_add_bank(&server, &token, 10_000).await; // balance 9000

    let created = server
        .post("/api/wallet/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "amount_cents": 9_000 }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let payout: serde_json::Value = created.json();
    let payout_id = payout["id"].as_str().unwrap();

    // A non-admin cannot see the queue
    let forbidden = server
        .get("/api/admin/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    forbidden.assert_status(StatusCode::FORBIDDEN);

    let queue = server
        .get("/api/admin/payouts?status=pending")
        .add_header("Authorization", format!("Bearer {}", admin_token))
        .await;
    queue.assert_status_ok();
    let queue_body: serde_json::Value = queue.json();
    let entry = queue_body
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == payout_id)
        .expect("payout missing from admin queue");
    assert!(entry["requester_email"].as_str().is_some());

    let processed = server
        .post(format!("/api/admin/payouts/{}/process", payout_id).as_str())
        .add_header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "status": "completed" }))
        .await;
    processed.assert_status_ok();
    let processed_body: serde_json::Value = processed.json();
    assert_eq!(processed_body["success"], true);
    assert_eq!(processed_body["payout"]["status"], "completed");
    assert!(processed_body["payout"]["processed_at"].as_str().is_some());

    // The balance stays debited and nothing is pending anymore
    let wallet = server
        .get("/api/wallet")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    let wallet_body: serde_json::Value = wallet.json();
    assert_eq!(wallet_body["balance_cents"], 0);
    assert_eq!(wallet_body["pending_payout_cents"], 0);

    // Deciding twice is refused
    let again = server
        .post(format!("/api/admin/payouts/{}/process", payout_id).as_str())
        .add_header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "status": "rejected", "reject_reason": "changed my mind" }))
        .await;
    again.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn test_rejection_needs_a_reason_and_restores_balance() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let admin_email = unique_email("reject_admin");
    let (admin_token, _) = create_test_user(&server, &admin_email).await;
    {
        let mut conn = state.db.get().unwrap();
        promote_to_admin(&mut conn, &admin_email);
    }

    let (token, _) = create_test_user(&server, &unique_email("rejected_user")).await;
    earn_and_add_bank(&server, &token, 10_000).await; // balance 9000

    let created = server
        .post("/api/wallet/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "amount_cents": 6_000 }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let payout: serde_json::Value = created.json();
    let payout_id = payout["id"].as_str().unwrap();

    let missing_reason = server
        .post(format!("/api/admin/payouts/{}/process", payout_id).as_str())
        .add_header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "status": "rejected" }))
        .await;
    missing_reason.assert_status(StatusCode::BAD_REQUEST);

    let rejected = server
        .post(format!("/api/admin/payouts/{}/process", payout_id).as_str())
        .add_header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "status": "rejected", "reject_reason": "IBAN does not match the holder" }))
        .await;
    rejected.assert_status_ok();
    let rejected_body: serde_json::Value = rejected.json();
    assert_eq!(rejected_body["payout"]["status"], "rejected");
    assert_eq!(
        rejected_body["payout"]["reject_reason"],
        "IBAN does not match the holder"
    );

    let wallet = server
        .get("/api/wallet")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    let wallet_body: serde_json::Value = wallet.json();
    assert_eq!(wallet_body["balance_cents"], 9_000);
    assert_eq!(wallet_body["pending_payout_cents"], 0);
}

#[tokio::test]
#[serial]
async fn test_only_completed_or_rejected_are_valid_decisions() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let admin_email = unique_email("strict_admin");
    let (admin_token, _) = create_test_user(&server, &admin_email).await;
    {
        let mut conn = state.db.get().unwrap();
        promote_to_admin(&mut conn, &admin_email);
    }

    let (token, _) = create_test_user(&server, &unique_email("parked")).await;
    earn_and_add_bank(&server, &token, 10_000).await;

    let created = server
        .post("/api/wallet/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "amount_cents": 2_000 }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let payout: serde_json::Value = created.json();
    let payout_id = payout["id"].as_str().unwrap();

    let response = server
        .post(format!("/api/admin/payouts/{}/process", payout_id).as_str())
        .add_header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "status": "pending" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
