use axum::extract::{Extension, Json, Path, State};
use entraide_core::services::payout_service::PayoutService;
use entraide_core::{AppState, Claims, SecurityConfig};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::payout_dto::{ProcessPayoutRequest, ProcessPayoutResponse};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/admin/payouts/{payout_id}/process",
    tag = "Admin",
    description = "Decide a payout request. Completing marks the provider's pending earnings as \
                   paid; rejecting needs a reason and restores the held amount to the wallet. \
                   A request can only be decided once.",
    params(("payout_id" = Uuid, Path, description = "Payout request id")),
    request_body = ProcessPayoutRequest,
    responses(
        (status = 200, description = "Payout decided", body = ProcessPayoutResponse),
        (status = 400, description = "Invalid decision", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ApiErrorResponse),
        (status = 404, description = "Payout request not found", body = ApiErrorResponse),
        (status = 409, description = "Payout request already decided", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn process_payout(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(payout_id): Path<Uuid>,
    Json(payload): Json<ProcessPayoutRequest>,
) -> Result<Json<ProcessPayoutResponse>, ApiError> {
    let mut conn = state.db.get().map_err(|_| {
        error!("process_payout: failed to acquire db connection");
        ApiError::DatabaseConnection("Database unavailable".into())
    })?;
    let admin = SecurityConfig::require_admin(&mut conn, &claims)?;
    drop(conn);

    let res = PayoutService::process(&state, admin.id, payout_id, payload).await?;

    Ok(Json(res))
}
