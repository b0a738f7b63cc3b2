use axum::extract::{Extension, Json, State};
use entraide_core::services::payout_service::PayoutService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::payout_dto::PayoutRequestDto;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/wallet/payouts",
    tag = "Wallet",
    description = "The caller's payout requests, newest first.",
    responses(
        (status = 200, description = "Payout requests", body = Vec<PayoutRequestDto>),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn my_payouts(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<PayoutRequestDto>>, ApiError> {
    let user_id = claims.user_id()?;

    let payouts = PayoutService::my_payouts(&state, user_id).await?;

    Ok(Json(payouts))
}
