use crate::models::entities::enum_types::TransactionPayoutStatus;
use crate::models::entities::transaction::Transaction;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionDto {
    pub id: Uuid,
    pub session_id: Uuid,
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

impl From<Transaction> for TransactionDto {
    fn from(txn: Transaction) -> Self {
        Self {
            id: txn.id,
            session_id: txn.session_id,
            demandeur_id: txn.demandeur_id,
            offreur_id: txn.offreur_id,
            total_cents: txn.total_cents,
            commission_rate: txn.commission_rate,
            commission_cents: txn.commission_cents,
            provider_cents: txn.provider_cents,
            processor_fee_cents: txn.processor_fee_cents,
            payout_status: txn.payout_status,
            created_at: txn.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SettleResponse {
    pub transaction_id: Uuid,
    pub session_id: Uuid,
    #[schema(example = 10000)]
    pub total_cents: i64,
    #[schema(example = 10)]
    pub commission_rate: i32,
    #[schema(example = 1000)]
    pub commission_cents: i64,
    #[schema(example = 9000)]
    pub provider_cents: i64,
    #[schema(example = 320)]
    pub processor_fee_cents: i64,
    /// True when a previous call already settled this session.
    pub already_exists: bool,
}
