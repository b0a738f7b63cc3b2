use crate::models::dtos::user_dto::BankAccountDto;
use crate::models::entities::enum_types::PayoutStatus;
use crate::models::entities::payout_request::PayoutRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePayoutRequest {
    #[schema(example = 5000)]
    #[validate(range(min = 1))]
    pub amount_cents: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PayoutRequestDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount_cents: i64,
    pub status: PayoutStatus,
    pub bank_account: Option<BankAccountDto>,
    pub reject_reason: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<PayoutRequest> for PayoutRequestDto {
    fn from(payout: PayoutRequest) -> Self {
        let bank_account = serde_json::from_value(payout.bank_account).ok();
        Self {
            id: payout.id,
            user_id: payout.user_id,
            amount_cents: payout.amount_cents,
            status: payout.status,
            bank_account,
            reject_reason: payout.reject_reason,
            processed_at: payout.processed_at,
            created_at: payout.created_at,
        }
    }
}

/// Queue entry for the admin payout screen.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminPayoutDto {
    #[serde(flatten)]
    pub payout: PayoutRequestDto,
    #[schema(example = "bruno@example.com")]
    pub requester_email: String,
    #[schema(example = "Bruno Keita")]
    pub requester_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessPayoutRequest {
    /// `completed` or `rejected`; anything else is refused.
    pub status: PayoutStatus,
    pub reject_reason: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessPayoutResponse {
    pub success: bool,
    pub payout: PayoutRequestDto,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PayoutQueueQuery {
    pub status: Option<PayoutStatus>,
}
