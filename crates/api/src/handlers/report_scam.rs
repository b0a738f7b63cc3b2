use axum::extract::{Extension, Json, Path, State};
use entraide_core::services::session_service::SessionService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::session_dto::{ReportScamRequest, ReportScamResponse};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/sessions/{session_id}/report-scam",
    tag = "Sessions",
    description = "Report an active session as a scam. Allowed only during the first quarter of \
                   the expected duration; the session and its demande are cancelled and no \
                   payment is taken.",
    params(("session_id" = Uuid, Path, description = "Session id")),
    request_body = ReportScamRequest,
    responses(
        (status = 200, description = "Session cancelled", body = ReportScamResponse),
        (status = 400, description = "Report window closed or invalid reason", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Caller is not a participant", body = ApiErrorResponse),
        (status = 404, description = "Session not found", body = ApiErrorResponse),
        (status = 409, description = "Session is not active", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn report_scam(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<ReportScamRequest>,
) -> Result<Json<ReportScamResponse>, ApiError> {
    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::from(e)
    })?;

    let user_id = claims.user_id()?;

    let res = SessionService::report_scam(&state, user_id, session_id, payload).await?;

    Ok(Json(res))
}
