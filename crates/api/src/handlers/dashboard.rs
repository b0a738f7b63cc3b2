use axum::extract::{Extension, Json, State};
use entraide_core::services::dashboard_service::DashboardService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::views_dto::DashboardResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Views",
    description = "Per-user counters: open demandes, pending offres, active sessions, wallet \
                   balance. Admins also get platform totals.",
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "User not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let user_id = claims.user_id()?;

    let res = DashboardService::dashboard(&state, user_id).await?;

    Ok(Json(res))
}
