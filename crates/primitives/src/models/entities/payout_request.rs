use crate::models::entities::enum_types::PayoutStatus;
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::payout_requests)]
#[diesel(belongs_to(crate::models::entities::user::User))]
pub struct PayoutRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount_cents: i64,
    pub status: PayoutStatus,
    pub bank_account: Value,
    pub reject_reason: Option<String>,
    pub processed_by: Option<Uuid>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::payout_requests)]
pub struct NewPayoutRequest {
    pub user_id: Uuid,
    pub amount_cents: i64,
    pub status: PayoutStatus,
    pub bank_account: Value,
}
