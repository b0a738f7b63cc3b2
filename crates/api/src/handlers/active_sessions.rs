use axum::extract::{Extension, Json, State};
use entraide_core::services::session_service::SessionService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::session_dto::SessionDto;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/sessions/active",
    tag = "Sessions",
    description = "All active sessions the caller participates in, newest first.",
    responses(
        (status = 200, description = "Active sessions", body = Vec<SessionDto>),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn active_sessions(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<SessionDto>>, ApiError> {
    let user_id = claims.user_id()?;

    let sessions = SessionService::active_sessions(&state, user_id).await?;

    Ok(Json(sessions))
}
