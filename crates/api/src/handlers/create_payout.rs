use axum::extract::{Extension, Json, State};
use axum::http::StatusCode;
use entraide_core::services::payout_service::PayoutService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::payout_dto::{CreatePayoutRequest, PayoutRequestDto};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/wallet/payouts",
    tag = "Wallet",
    description = "Request a payout from the wallet balance. The amount is debited immediately \
                   and held against the request; the bank details on the profile are snapshotted \
                   so later profile edits cannot redirect the transfer. Requires saved bank \
                   details and at least the minimum payout amount. Rejected requests restore \
                   the balance.",
    request_body = CreatePayoutRequest,
    responses(
        (status = 201, description = "Payout request created", body = PayoutRequestDto),
        (status = 400, description = "Missing bank details or amount below minimum", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 402, description = "Insufficient balance", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn create_payout(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreatePayoutRequest>,
) -> Result<(StatusCode, Json<PayoutRequestDto>), ApiError> {
    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::from(e)
    })?;

    let user_id = claims.user_id()?;

    let payout = PayoutService::request_payout(&state, user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(payout)))
}
