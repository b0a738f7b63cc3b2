mod common;

use axum_test::TestServer;
use common::fixtures::{demande_payload, unique_email};
use common::helpers::{create_demande, place_offre};
use common::{create_test_app, create_test_app_state, create_test_user};
use http::StatusCode;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_create_demande_starts_pending() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (token, user_id) = create_test_user(&server, &unique_email("poster")).await;

    let response = server
        .post("/api/demandes")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&demande_payload("Fix my nginx config", 10_000, 60))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "pending");
    assert_eq!(body["requester_id"], user_id.as_str());
    assert_eq!(body["price_cents"], 10_000);
    assert_eq!(body["duration_minutes"], 60);
}

#[tokio::test]
#[serial]
async fn test_create_demande_validates_price() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (token, _) = create_test_user(&server, &unique_email("cheap")).await;

    let response = server
        .post("/api/demandes")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Free help please",
            "description": "This one should not get through validation.",
            "category": "informatique",
            "price_cents": 0,
            "duration_minutes": 60
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_browse_excludes_own_demandes() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("owner")).await;
    let (browser_token, _) = create_test_user(&server, &unique_email("browser")).await;

    let demande_id = create_demande(&server, &poster_token, "Visible to others", 5_000, 30).await;

    let own_view = server
        .get("/api/demandes")
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    own_view.assert_status_ok();
    let own: serde_json::Value = own_view.json();
    assert!(own
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d["id"] != demande_id.as_str()));

    let other_view = server
        .get("/api/demandes")
        .add_header("Authorization", format!("Bearer {}", browser_token))
        .await;
    other_view.assert_status_ok();
    let others: serde_json::Value = other_view.json();
    let found = others
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"] == demande_id.as_str())
        .expect("demande should be browsable by other users");
    assert!(found["requester_name"].as_str().is_some());
}

#[tokio::test]
#[serial]
async fn test_my_demandes_counts_pending_offres() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("counter")).await;
    let (bidder_token, _) = create_test_user(&server, &unique_email("bidder")).await;

    let demande_id = create_demande(&server, &poster_token, "Count my offres", 8_000, 45).await;
    place_offre(&server, &bidder_token, &demande_id, 7_000).await;

    let mine = server
        .get("/api/demandes/mine")
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    mine.assert_status_ok();
    let body: serde_json::Value = mine.json();
    let entry = body
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"] == demande_id.as_str())
        .expect("own demande missing from /mine");
    assert_eq!(entry["pending_offres"], 1);
}

#[tokio::test]
#[serial]
async fn test_detail_hides_other_peoples_offres() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("detail_owner")).await;
    let (bidder_a_token, _) = create_test_user(&server, &unique_email("bidder_a")).await;
    let (bidder_b_token, _) = create_test_user(&server, &unique_email("bidder_b")).await;

    let demande_id = create_demande(&server, &poster_token, "Two bidders", 12_000, 90).await;
    place_offre(&server, &bidder_a_token, &demande_id, 11_000).await;
    place_offre(&server, &bidder_b_token, &demande_id, 10_000).await;

    let owner_view = server
        .get(format!("/api/demandes/{}", demande_id).as_str())
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    owner_view.assert_status_ok();
    let owner_body: serde_json::Value = owner_view.json();
    assert_eq!(owner_body["offres"].as_array().unwrap().len(), 2);

    let bidder_view = server
        .get(format!("/api/demandes/{}", demande_id).as_str())
        .add_header("Authorization", format!("Bearer {}", bidder_a_token))
        .await;
    bidder_view.assert_status_ok();
    let bidder_body: serde_json::Value = bidder_view.json();
    // A bidder only sees their own offre on someone else's demande
    assert_eq!(bidder_body["offres"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_cancel_pending_demande_only_once() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("cancel")).await;
    let (stranger_token, _) = create_test_user(&server, &unique_email("stranger")).await;

    let demande_id = create_demande(&server, &poster_token, "Cancel me", 5_000, 30).await;

    let foreign = server
        .post(format!("/api/demandes/{}/cancel", demande_id).as_str())
        .add_header("Authorization", format!("Bearer {}", stranger_token))
        .await;
    foreign.assert_status(StatusCode::FORBIDDEN);

    let cancelled = server
        .post(format!("/api/demandes/{}/cancel", demande_id).as_str())
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    cancelled.assert_status_ok();
    let body: serde_json::Value = cancelled.json();
    assert_eq!(body["status"], "cancelled");

    let again = server
        .post(format!("/api/demandes/{}/cancel", demande_id).as_str())
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    again.assert_status(StatusCode::CONFLICT);
}
