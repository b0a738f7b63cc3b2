mod common;

use axum_test::TestServer;
use common::fixtures::{offre_payload, unique_email};
use common::helpers::{accept_offre, create_demande, place_offre};
use common::{create_test_app, create_test_app_state, create_test_user};
use diesel::prelude::*;
use http::StatusCode;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_cannot_bid_on_own_demande() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (token, _) = create_test_user(&server, &unique_email("selfbid")).await;
    let demande_id = create_demande(&server, &token, "My own demande", 5_000, 30).await;

    let response = server
        .post(format!("/api/demandes/{}/offres", demande_id).as_str())
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&offre_payload(4_000))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn test_one_live_offre_per_demande_and_offreur() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("poster")).await;
    let (bidder_token, _) = create_test_user(&server, &unique_email("eager")).await;

    let demande_id = create_demande(&server, &poster_token, "Popular demande", 9_000, 60).await;
    place_offre(&server, &bidder_token, &demande_id, 8_000).await;

    let second = server
        .post(format!("/api/demandes/{}/offres", demande_id).as_str())
        .add_header("Authorization", format!("Bearer {}", bidder_token))
        .json(&offre_payload(7_500))
        .await;

    second.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn test_cannot_bid_on_cancelled_demande() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("closer")).await;
    let (bidder_token, _) = create_test_user(&server, &unique_email("late")).await;

    let demande_id = create_demande(&server, &poster_token, "Closing soon", 5_000, 30).await;
    let cancel = server
        .post(format!("/api/demandes/{}/cancel", demande_id).as_str())
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    cancel.assert_status_ok();

    let response = server
        .post(format!("/api/demandes/{}/offres", demande_id).as_str())
        .add_header("Authorization", format!("Bearer {}", bidder_token))
        .json(&offre_payload(4_000))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn test_accept_creates_session_and_moves_demande() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("accepting")).await;
    let (bidder_token, bidder_id) = create_test_user(&server, &unique_email("chosen")).await;

    let demande_id = create_demande(&server, &poster_token, "Accept this", 10_000, 60).await;
    let offre_id = place_offre(&server, &bidder_token, &demande_id, 9_000).await;

    let response = server
        .patch(format!("/api/offres/{}/status", offre_id).as_str())
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .json(&json!({ "status": "accepted" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "accepted");
    let session_id = body["meet_session_id"].as_str().unwrap().to_string();
    assert!(body["call_id"].as_str().unwrap().starts_with("entraide-"));

    // Demande is now in progress
    let mine = server
        .get("/api/demandes/mine")
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    let demandes: serde_json::Value = mine.json();
    let entry = demandes
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"] == demande_id.as_str())
        .unwrap();
    assert_eq!(entry["status"], "in_progress");

    // Both participants can load the session, at the offre's agreed price
    let session = server
        .get(format!("/api/sessions/{}", session_id).as_str())
        .add_header("Authorization", format!("Bearer {}", bidder_token))
        .await;
    session.assert_status_ok();
    let session_body: serde_json::Value = session.json();
    assert_eq!(session_body["status"], "active");
    assert_eq!(session_body["price_cents"], 9_000);
    assert_eq!(session_body["offreur_id"], bidder_id.as_str());
}

#[tokio::test]
#[serial]
async fn test_only_the_owner_decides() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("owner")).await;
    let (bidder_token, _) = create_test_user(&server, &unique_email("impatient")).await;

    let demande_id = create_demande(&server, &poster_token, "Not yours to decide", 6_000, 30).await;
    let offre_id = place_offre(&server, &bidder_token, &demande_id, 5_000).await;

    let response = server
        .patch(format!("/api/offres/{}/status", offre_id).as_str())
        .add_header("Authorization", format!("Bearer {}", bidder_token))
        .json(&json!({ "status": "accepted" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn test_decisions_are_final() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("final")).await;
    let (bidder_token, _) = create_test_user(&server, &unique_email("decided")).await;

    let demande_id = create_demande(&server, &poster_token, "One decision", 6_000, 30).await;
    let offre_id = place_offre(&server, &bidder_token, &demande_id, 5_500).await;
    accept_offre(&server, &poster_token, &offre_id).await;

    let flip = server
        .patch(format!("/api/offres/{}/status", offre_id).as_str())
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .json(&json!({ "status": "rejected" }))
        .await;
    flip.assert_status(StatusCode::CONFLICT);

    let back_to_pending = server
        .patch(format!("/api/offres/{}/status", offre_id).as_str())
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .json(&json!({ "status": "pending" }))
        .await;
    back_to_pending.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_second_accept_on_same_demande_conflicts() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("double")).await;
    let (first_token, _) = create_test_user(&server, &unique_email("winner")).await;
    let (second_token, _) = create_test_user(&server, &unique_email("runner_up")).await;

    let demande_id = create_demande(&server, &poster_token, "Only one winner", 10_000, 60).await;
    let first_offre = place_offre(&server, &first_token, &demande_id, 9_000).await;
    let second_offre = place_offre(&server, &second_token, &demande_id, 8_000).await;

    accept_offre(&server, &poster_token, &first_offre).await;

    let response = server
        .patch(format!("/api/offres/{}/status", second_offre).as_str())
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .json(&json!({ "status": "accepted" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn test_concurrent_accepts_spawn_one_session() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("race_owner")).await;
    let (bidder_token, _) = create_test_user(&server, &unique_email("race_bidder")).await;

    let demande_id = create_demande(&server, &poster_token, "Race to accept", 10_000, 60).await;
    let offre_id = place_offre(&server, &bidder_token, &demande_id, 9_000).await;

    let path = format!("/api/offres/{}/status", offre_id);
    let payload = json!({ "status": "accepted" });
    let (a, b) = tokio::join!(
        server
            .patch(path.as_str())
            .add_header("Authorization", format!("Bearer {}", poster_token))
            .json(&payload),
        server
            .patch(path.as_str())
            .add_header("Authorization", format!("Bearer {}", poster_token))
            .json(&payload),
    );

    let mut statuses = [a.status_code(), b.status_code()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    // Exactly one session row behind the offre
    let mut conn = state.db.get().unwrap();
    use entraide_primitives::schema::meet_sessions;
    let count: i64 = meet_sessions::table
        .filter(meet_sessions::offre_id.eq(uuid::Uuid::parse_str(&offre_id).unwrap()))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[serial]
async fn test_reject_leaves_no_session() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("rejecting")).await;
    let (bidder_token, _) = create_test_user(&server, &unique_email("rejected")).await;

    let demande_id = create_demande(&server, &poster_token, "Not this one", 6_000, 30).await;
    let offre_id = place_offre(&server, &bidder_token, &demande_id, 5_000).await;

    let response = server
        .patch(format!("/api/offres/{}/status", offre_id).as_str())
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .json(&json!({ "status": "rejected" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "rejected");
    assert!(body["meet_session_id"].is_null());

    // The demande stays open for other offres
    let mine = server
        .get("/api/demandes/mine")
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    let demandes: serde_json::Value = mine.json();
    let entry = demandes
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"] == demande_id.as_str())
        .unwrap();
    assert_eq!(entry["status"], "pending");
}
