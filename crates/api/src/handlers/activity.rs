use axum::extract::{Extension, Json, State};
use entraide_core::services::dashboard_service::DashboardService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::views_dto::ActivityResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/activity",
    tag = "Views",
    description = "Chronological feed of the caller's demandes, offres, sessions and money \
                   movements, newest first.",
    responses(
        (status = 200, description = "Activity feed", body = ActivityResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn activity(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let user_id = claims.user_id()?;

    let res = DashboardService::activity(&state, user_id).await?;

    Ok(Json(res))
}
