use axum::extract::{Extension, Path, State};
use axum::Json;
use entraide_core::services::demande_service::DemandeService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::demande_dto::DemandeDto;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/demandes/{demande_id}/cancel",
    tag = "Demandes",
    description = "Owner cancellation. Allowed only while the demande is still pending; once an \
                   offre is accepted the demande is in progress and cancelling it goes through \
                   the session scam report instead.",
    params(("demande_id" = Uuid, Path, description = "Demande to cancel")),
    responses(
        (status = 200, description = "Demande cancelled", body = DemandeDto),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Caller does not own the demande", body = ApiErrorResponse),
        (status = 404, description = "Demande not found", body = ApiErrorResponse),
        (status = 409, description = "Demande is no longer pending", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn cancel_demande(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(demande_id): Path<Uuid>,
) -> Result<Json<DemandeDto>, ApiError> {
    let user_id = claims.user_id()?;

    let res = DemandeService::cancel(&state, user_id, demande_id).await?;

    Ok(Json(res))
}
