use crate::models::entities::enum_types::{MeetSessionStatus, SessionPaymentStatus};
use crate::models::entities::meet_session::MeetSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionDto {
    pub id: Uuid,
    pub offre_id: Uuid,
    pub demande_id: Uuid,
    pub demandeur_id: Uuid,
    pub offreur_id: Uuid,
    #[schema(example = "Alice Martin")]
    pub demandeur_name: Option<String>,
    #[schema(example = "Bruno Keita")]
    pub offreur_name: Option<String>,
    #[schema(example = "entraide-1a2b3c4d-1733412000")]
    pub call_id: String,
    pub price_cents: i64,
    pub expected_duration_minutes: i32,
    pub status: MeetSessionStatus,
    pub payment_status: SessionPaymentStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl SessionDto {
    pub fn from_session(
        session: MeetSession,
        demandeur_name: Option<String>,
        offreur_name: Option<String>,
    ) -> Self {
        Self {
            id: session.id,
            offre_id: session.offre_id,
            demande_id: session.demande_id,
            demandeur_id: session.demandeur_id,
            offreur_id: session.offreur_id,
            demandeur_name,
            offreur_name,
            call_id: session.call_id,
            price_cents: session.price_cents,
            expected_duration_minutes: session.expected_duration_minutes,
            status: session.status,
            payment_status: session.payment_status,
            started_at: session.started_at,
            ended_at: session.ended_at,
        }
    }
}

impl From<MeetSession> for SessionDto {
    fn from(session: MeetSession) -> Self {
        SessionDto::from_session(session, None, None)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CallTokenResponse {
    pub token: String,
    pub call_id: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentIntentResponse {
    #[schema(example = "pi_demo_1a2b3c4d5e6f")]
    pub payment_intent_id: String,
    #[schema(example = "pi_demo_1a2b3c4d5e6f_secret_9z8y7x")]
    pub client_secret: String,
    pub amount_cents: i64,
    #[schema(example = "eur")]
    pub currency: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReportScamRequest {
    #[validate(length(min = 10, max = 2000))]
    pub reason: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportScamResponse {
    pub success: bool,
    pub message: String,
}
