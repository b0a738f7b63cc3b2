mod common;

use axum_test::TestServer;
use common::fixtures::unique_email;
use common::helpers::{end_session, setup_accepted_session};
use common::{create_test_app, create_test_app_state, create_test_user};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_fresh_wallet_is_empty() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (token, _) = create_test_user(&server, &unique_email("newcomer")).await;

    let response = server
        .get("/api/wallet")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance_cents"], 0);
    assert_eq!(body["pending_payout_cents"], 0);
    assert_eq!(body["total_earned_cents"], 0);
}

#[tokio::test]
#[serial]
async fn test_wallet_reflects_settled_earnings() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (demandeur_token, _) = create_test_user(&server, &unique_email("spender")).await;
    let (offreur_token, _) = create_test_user(&server, &unique_email("earner")).await;

    let (_, _, session_id) =
        setup_accepted_session(&server, &demandeur_token, &offreur_token, 10_000, 60).await;
    end_session(&server, &demandeur_token, &session_id).await;

    let settle = server
        .post(format!("/api/sessions/{}/settle", session_id).as_str())
        .add_header("Authorization", format!("Bearer {}", offreur_token))
        .await;
    settle.assert_status_ok();

    let wallet = server
        .get("/api/wallet")
        .add_header("Authorization", format!("Bearer {}", offreur_token))
        .await;
    wallet.assert_status_ok();
    let body: serde_json::Value = wallet.json();
    assert_eq!(body["balance_cents"], 9_000);
    assert_eq!(body["total_earned_cents"], 9_000);
    assert_eq!(body["pending_payout_cents"], 0);
}

#[tokio::test]
#[serial]
async fn test_transaction_history_shows_both_parties() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (demandeur_token, demandeur_id) = create_test_user(&server, &unique_email("hist_d")).await;
    let (offreur_token, offreur_id) = create_test_user(&server, &unique_email("hist_o")).await;

    let (_, _, session_id) =
        setup_accepted_session(&server, &demandeur_token, &offreur_token, 8_000, 45).await;
    end_session(&server, &offreur_token, &session_id).await;

    let settle = server
        .post(format!("/api/sessions/{}/settle", session_id).as_str())
        .add_header("Authorization", format!("Bearer {}", demandeur_token))
        .await;
    settle.assert_status_ok();

    for token in [&demandeur_token, &offreur_token] {
        let response = server
            .get("/api/wallet/transactions")
            .add_header("Authorization", format!("Bearer {}", token))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let txns = body["transactions"].as_array().unwrap();
        let entry = txns
            .iter()
            .find(|t| t["session_id"] == session_id.as_str())
            .expect("settled session missing from history");
        assert_eq!(entry["total_cents"], 8_000);
        assert_eq!(entry["provider_cents"], 7_200);
        assert_eq!(entry["demandeur_id"], demandeur_id.as_str());
        assert_eq!(entry["offreur_id"], offreur_id.as_str());
        assert_eq!(entry["payout_status"], "pending");
    }
}
