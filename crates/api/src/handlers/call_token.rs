use axum::extract::{Extension, Json, Path, State};
use entraide_core::services::session_service::SessionService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::session_dto::CallTokenResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/sessions/{session_id}/call-token",
    tag = "Sessions",
    description = "Issue a short-lived video call token for an active session. Each participant \
                   requests their own token; tokens are signed server-side and never stored.",
    params(("session_id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Call token issued", body = CallTokenResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Caller is not a participant", body = ApiErrorResponse),
        (status = 404, description = "Session not found", body = ApiErrorResponse),
        (status = 409, description = "Session is not active", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn call_token(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CallTokenResponse>, ApiError> {
    let user_id = claims.user_id()?;

    let res = SessionService::call_token(&state, user_id, session_id).await?;

    Ok(Json(res))
}
