use axum::extract::{Extension, Json, State};
use entraide_core::services::wallet_service::WalletService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::wallet_dto::WalletResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/wallet",
    tag = "Wallet",
    description = "Wallet overview: available balance, amount locked in undecided payouts and \
                   lifetime earnings.",
    responses(
        (status = 200, description = "Wallet overview", body = WalletResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "User not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn wallet(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<WalletResponse>, ApiError> {
    let user_id = claims.user_id()?;

    let res = WalletService::overview(&state, user_id).await?;

    Ok(Json(res))
}
