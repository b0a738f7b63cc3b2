use axum::extract::{Extension, Json, Path, State};
use entraide_core::services::session_service::SessionService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::session_dto::SessionDto;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/sessions/{session_id}/end",
    tag = "Sessions",
    description = "End an active session. Either participant can end it; the session moves to \
                   completed and becomes eligible for settlement.",
    params(("session_id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session ended", body = SessionDto),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Caller is not a participant", body = ApiErrorResponse),
        (status = 404, description = "Session not found", body = ApiErrorResponse),
        (status = 409, description = "Session already ended", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionDto>, ApiError> {
    let user_id = claims.user_id()?;

    let session = SessionService::end_session(&state, user_id, session_id).await?;

    Ok(Json(session))
}
