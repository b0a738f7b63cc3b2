use entraide_primitives::models::dtos::auth_dto::RegisterRequest;
use serde_json::{json, Value};
use uuid::Uuid;

/// Create a test user registration request with random data
#[allow(dead_code)]
pub fn create_test_register_request() -> RegisterRequest {
    RegisterRequest {
        email: format!("test{}@example.com", Uuid::new_v4()),
        password: "SecurePass123!".to_string(),
        display_name: format!("User {}", Uuid::new_v4().simple()),
    }
}

/// Unique email for one test
#[allow(dead_code)]
pub fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, Uuid::new_v4().simple())
}

/// Demande creation payload with sensible defaults
#[allow(dead_code)]
pub fn demande_payload(title: &str, price_cents: i64, duration_minutes: i32) -> Value {
    json!({
        "title": title,
        "description": "I need help with something that takes a while to explain properly.",
        "category": "informatique",
        "price_cents": price_cents,
        "duration_minutes": duration_minutes
    })
}

/// Offre creation payload
#[allow(dead_code)]
pub fn offre_payload(price_cents: i64) -> Value {
    json!({
        "price_cents": price_cents,
        "message": "I have done this many times, happy to walk you through it."
    })
}
