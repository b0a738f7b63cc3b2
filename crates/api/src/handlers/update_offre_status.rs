use axum::extract::{Extension, Json, Path, State};
use entraide_core::services::offre_service::OffreService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::offre_dto::{
    UpdateOffreStatusRequest, UpdateOffreStatusResponse,
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    patch,
    path = "/api/offres/{offre_id}/status",
    tag = "Offres",
    description = "Demande owner accepts or rejects a bid. Accepting creates the video session \
                   and moves the demande to in_progress in the same transaction; the response \
                   carries the session id and call room. Decisions are final: a second decision \
                   on the same offre returns 409.",
    params(("offre_id" = Uuid, Path, description = "Offre to decide on")),
    request_body = UpdateOffreStatusRequest,
    responses(
        (status = 200, description = "Decision applied", body = UpdateOffreStatusResponse),
        (status = 400, description = "Target status is not a decision", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Caller does not own the demande", body = ApiErrorResponse),
        (status = 404, description = "Offre not found", body = ApiErrorResponse),
        (status = 409, description = "Offre already decided", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn update_offre_status(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(offre_id): Path<Uuid>,
    Json(payload): Json<UpdateOffreStatusRequest>,
) -> Result<Json<UpdateOffreStatusResponse>, ApiError> {
    let user_id = claims.user_id()?;

    let res = OffreService::update_status(&state, user_id, offre_id, payload).await?;

    Ok(Json(res))
}
