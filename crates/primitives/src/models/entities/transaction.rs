use crate::models::entities::enum_types::TransactionPayoutStatus;
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(belongs_to(crate::models::entities::meet_session::MeetSession, foreign_key = session_id))]
pub struct Transaction {
    pub id: Uuid,
    pub session_id: Uuid,
    pub offre_id: Uuid,
    pub demandeur_id: Uuid,
    pub offreur_id: Uuid,
    pub total_cents: i64,
    pub commission_rate: i32,
    pub commission_cents: i64,
    pub provider_cents: i64,
    pub processor_fee_cents: i64,
    pub payout_status: TransactionPayoutStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransaction {
    pub session_id: Uuid,
    pub offre_id: Uuid,
    pub demandeur_id: Uuid,
    pub offreur_id: Uuid,
    pub total_cents: i64,
    pub commission_rate: i32,
    pub commission_cents: i64,
    pub provider_cents: i64,
    pub processor_fee_cents: i64,
    pub payout_status: TransactionPayoutStatus,
}
