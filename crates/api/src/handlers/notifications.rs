use axum::extract::{Extension, Json, State};
use entraide_core::services::dashboard_service::DashboardService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::views_dto::NotificationsResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Views",
    description = "Recent events addressed to the caller: offres received on their demandes, \
                   decisions on their offres and payout outcomes. Derived on the fly, newest first.",
    responses(
        (status = 200, description = "Notifications", body = NotificationsResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn notifications(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<NotificationsResponse>, ApiError> {
    let user_id = claims.user_id()?;

    let res = DashboardService::notifications(&state, user_id).await?;

    Ok(Json(res))
}
