mod common;

use axum_test::TestServer;
use common::fixtures::unique_email;
use common::helpers::{accept_offre, create_demande, end_session, place_offre};
use common::{create_test_app, create_test_app_state, create_test_user, promote_to_admin};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_dashboard_tracks_the_funnel() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("dash_poster")).await;
    let (bidder_token, _) = create_test_user(&server, &unique_email("dash_bidder")).await;

    let fresh = server
        .get("/api/dashboard")
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    fresh.assert_status_ok();
    let fresh_body: serde_json::Value = fresh.json();
    assert_eq!(fresh_body["open_demandes"], 0);
    assert_eq!(fresh_body["active_sessions"], 0);
    assert!(fresh_body.get("admin").is_none());

    let demande_id = create_demande(&server, &poster_token, "Dashboard demande", 10_000, 60).await;
    let offre_id = place_offre(&server, &bidder_token, &demande_id, 9_000).await;

    let poster_view = server
        .get("/api/dashboard")
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    let poster_body: serde_json::Value = poster_view.json();
    assert_eq!(poster_body["open_demandes"], 1);
    assert_eq!(poster_body["pending_offres_received"], 1);

    let bidder_view = server
        .get("/api/dashboard")
        .add_header("Authorization", format!("Bearer {}", bidder_token))
        .await;
    let bidder_body: serde_json::Value = bidder_view.json();
    assert_eq!(bidder_body["pending_offres_sent"], 1);

    accept_offre(&server, &poster_token, &offre_id).await;

    let after_accept = server
        .get("/api/dashboard")
        .add_header("Authorization", format!("Bearer {}", bidder_token))
        .await;
    let after_body: serde_json::Value = after_accept.json();
    assert_eq!(after_body["active_sessions"], 1);
    assert_eq!(after_body["pending_offres_sent"], 0);
}

#[tokio::test]
#[serial]
async fn test_admin_dashboard_carries_platform_totals() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let admin_email = unique_email("dash_admin");
    let (admin_token, _) = create_test_user(&server, &admin_email).await;
    {
        let mut conn = state.db.get().unwrap();
        promote_to_admin(&mut conn, &admin_email);
    }

    let response = server
        .get("/api/dashboard")
        .add_header("Authorization", format!("Bearer {}", admin_token))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let admin = body
        .get("admin")
        .expect("admin block missing for admin user");
    assert!(admin["total_users"].as_i64().unwrap() >= 1);
    assert!(admin["commission_earned_cents"].as_i64().is_some());
    assert!(admin["payout_queue_depth"].as_i64().is_some());
}

#[tokio::test]
#[serial]
async fn test_notifications_follow_the_offre_lifecycle() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("notif_poster")).await;
    let (bidder_token, _) = create_test_user(&server, &unique_email("notif_bidder")).await;

    let demande_id = create_demande(&server, &poster_token, "Notify me", 10_000, 60).await;
    place_offre(&server, &bidder_token, &demande_id, 9_000).await;

    let poster_view = server
        .get("/api/notifications")
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    poster_view.assert_status_ok();
    let poster_body: serde_json::Value = poster_view.json();
    let received = poster_body["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["kind"] == "offre_received")
        .expect("demandeur should be told about the new offre");
    assert!(received["message"]
        .as_str()
        .unwrap()
        .contains("Notify me"));

    // Accept through a second offre cycle so the bidder is notified
    let offres = server
        .get(format!("/api/demandes/{}", demande_id).as_str())
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    let offres_body: serde_json::Value = offres.json();
    let offre_id = offres_body["offres"][0]["id"].as_str().unwrap().to_string();
    accept_offre(&server, &poster_token, &offre_id).await;

    let bidder_view = server
        .get("/api/notifications")
        .add_header("Authorization", format!("Bearer {}", bidder_token))
        .await;
    let bidder_body: serde_json::Value = bidder_view.json();
    assert!(bidder_body["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .any(|n| n["kind"] == "offre_accepted"));
}

#[tokio::test]
#[serial]
async fn test_activity_mixes_posts_offres_and_money() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state)).unwrap();

    let (poster_token, _) = create_test_user(&server, &unique_email("active_poster")).await;
    let (bidder_token, _) = create_test_user(&server, &unique_email("active_bidder")).await;

    let demande_id = create_demande(&server, &poster_token, "Busy demande", 10_000, 60).await;
    let offre_id = place_offre(&server, &bidder_token, &demande_id, 9_000).await;
    let session_id = accept_offre(&server, &poster_token, &offre_id).await;
    end_session(&server, &poster_token, &session_id).await;

    let settle = server
        .post(format!("/api/sessions/{}/settle", session_id).as_str())
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    settle.assert_status_ok();

    let poster_view = server
        .get("/api/activity")
        .add_header("Authorization", format!("Bearer {}", poster_token))
        .await;
    poster_view.assert_status_ok();
    let poster_body: serde_json::Value = poster_view.json();
    let kinds: Vec<&str> = poster_body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"demande_posted"));
    assert!(kinds.contains(&"payment"));

    let bidder_view = server
        .get("/api/activity")
        .add_header("Authorization", format!("Bearer {}", bidder_token))
        .await;
    let bidder_body: serde_json::Value = bidder_view.json();
    let earning = bidder_body["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["kind"] == "earning")
        .expect("provider earning missing from activity");
    // 9000 agreed on the offre, minus the 10% commission
    assert_eq!(earning["amount_cents"], 8_100);
}
