use axum::extract::{Extension, Json, State};
use entraide_core::services::wallet_service::WalletService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::wallet_dto::TransactionsResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/wallet/transactions",
    tag = "Wallet",
    description = "Settled transactions the caller took part in, as payer or provider, newest first.",
    responses(
        (status = 200, description = "Transaction history", body = TransactionsResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn wallet_transactions(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let user_id = claims.user_id()?;

    let res = WalletService::my_transactions(&state, user_id).await?;

    Ok(Json(res))
}
