use axum::extract::{Extension, Json, Query, State};
use entraide_core::services::payout_service::PayoutService;
use entraide_core::{AppState, Claims, SecurityConfig};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::payout_dto::{AdminPayoutDto, PayoutQueueQuery};
use std::sync::Arc;
use tracing::error;

#[utoipa::path(
    get,
    path = "/api/admin/payouts",
    tag = "Admin",
    description = "Payout queue for operators, oldest first, optionally filtered by status.",
    params(("status" = Option<String>, Query, description = "Filter by payout status")),
    responses(
        (status = 200, description = "Payout queue", body = Vec<AdminPayoutDto>),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn admin_payouts(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<PayoutQueueQuery>,
) -> Result<Json<Vec<AdminPayoutDto>>, ApiError> {
    let mut conn = state.db.get().map_err(|_| {
        error!("admin_payouts: failed to acquire db connection");
        ApiError::DatabaseConnection("Database unavailable".into())
    })?;
    SecurityConfig::require_admin(&mut conn, &claims)?;
    drop(conn);

    let queue = PayoutService::admin_queue(&state, query.status).await?;

    Ok(Json(queue))
}
