use axum_test::TestServer;
use serde_json::json;

use super::fixtures::{demande_payload, offre_payload};

/// Post a demande and return its id
#[allow(dead_code)]
pub async fn create_demande(
    server: &TestServer,
    token: &str,
    title: &str,
    price_cents: i64,
    duration_minutes: i32,
) -> String {
    let response = server
        .post("/api/demandes")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&demande_payload(title, price_cents, duration_minutes))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

/// Place an offre on a demande and return the offre id
#[allow(dead_code)]
pub async fn place_offre(
    server: &TestServer,
    token: &str,
    demande_id: &str,
    price_cents: i64,
) -> String {
    let response = server
        .post(format!("/api/demandes/{}/offres", demande_id).as_str())
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&offre_payload(price_cents))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

/// Accept an offre as the demande owner and return the created session id
#[allow(dead_code)]
pub async fn accept_offre(server: &TestServer, owner_token: &str, offre_id: &str) -> String {
    let response = server
        .patch(format!("/api/offres/{}/status", offre_id).as_str())
        .add_header("Authorization", format!("Bearer {}", owner_token))
        .json(&json!({ "status": "accepted" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    body["meet_session_id"].as_str().unwrap().to_string()
}

/// Full demandeur/offreur setup: demande posted, offre placed and accepted.
/// Returns (demande_id, offre_id, session_id).
#[allow(dead_code)]
pub async fn setup_accepted_session(
    server: &TestServer,
    demandeur_token: &str,
    offreur_token: &str,
    price_cents: i64,
    duration_minutes: i32,
) -> (String, String, String) {
    let demande_id = create_demande(
        server,
        demandeur_token,
        "Help me set up my dev machine",
        price_cents,
        duration_minutes,
    )
    .await;
    let offre_id = place_offre(server, offreur_token, &demande_id, price_cents).await;
    let session_id = accept_offre(server, demandeur_token, &offre_id).await;
    (demande_id, offre_id, session_id)
}

/// End the session so it becomes settleable
#[allow(dead_code)]
pub async fn end_session(server: &TestServer, token: &str, session_id: &str) {
    let response = server
        .post(format!("/api/sessions/{}/end", session_id).as_str())
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    response.assert_status_ok();
}
