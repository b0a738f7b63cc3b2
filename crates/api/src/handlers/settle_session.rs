use axum::extract::{Extension, Json, Path, State};
use entraide_core::services::settlement_service::SettlementService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::transaction_dto::SettleResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/sessions/{session_id}/settle",
    tag = "Sessions",
    description = "Settle a completed session. Splits the agreed price into platform commission \
                   and provider earnings, credits the offreur's wallet and records the ledger \
                   row, all inside one transaction. Settlement is idempotent: repeated calls \
                   return the existing split with already_exists set and never credit twice. \
                   Either participant can trigger it.",
    params(("session_id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Settlement result", body = SettleResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Caller is not a participant", body = ApiErrorResponse),
        (status = 404, description = "Session not found", body = ApiErrorResponse),
        (status = 409, description = "Session is not in a settleable state", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn settle_session(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SettleResponse>, ApiError> {
    let user_id = claims.user_id()?;

    let res = SettlementService::settle(&state, user_id, session_id).await?;

    Ok(Json(res))
}
