use crate::models::dtos::transaction_dto::TransactionDto;
use serde::Serialize;
use utoipa::ToSchema;

// --- Wallet & Balance DTOs ---

#[derive(Debug, Serialize, ToSchema)]
pub struct WalletResponse {
    #[schema(example = 12500)]
    pub balance_cents: i64,
    /// Amount locked in payout requests still awaiting an admin decision.
    #[schema(example = 2000)]
    pub pending_payout_cents: i64,
    /// Lifetime provider earnings across settled sessions.
    #[schema(example = 43000)]
    pub total_earned_cents: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionDto>,
}
