use crate::app_state::AppState;
use crate::repositories::payout_repository::PayoutRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::repositories::user_repository::UserRepository;
use entraide_primitives::error::{ApiError, AuthError};
use entraide_primitives::models::dtos::transaction_dto::TransactionDto;
use entraide_primitives::models::dtos::wallet_dto::{TransactionsResponse, WalletResponse};
use tracing::error;
use uuid::Uuid;

pub struct WalletService;

impl WalletService {
    pub async fn overview(state: &AppState, user_id: Uuid) -> Result<WalletResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("wallet.overview: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let user = UserRepository::find_by_id(&mut conn, user_id)?
            .ok_or_else(|| ApiError::Auth(AuthError::InvalidToken("User does not exist".into())))?;

        let pending_payout_cents = PayoutRepository::sum_undecided_for_user(&mut conn, user_id)?;
        let total_earned_cents =
            TransactionRepository::sum_provider_cents_for_offreur(&mut conn, user_id)?;

        Ok(WalletResponse {
            balance_cents: user.wallet_balance_cents,
            pending_payout_cents,
            total_earned_cents,
        })
    }

    pub async fn my_transactions(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<TransactionsResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("wallet.transactions: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let transactions = TransactionRepository::list_for_user(&mut conn, user_id)?;

        Ok(TransactionsResponse {
            transactions: transactions.into_iter().map(TransactionDto::from).collect(),
        })
    }
}
