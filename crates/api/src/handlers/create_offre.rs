use axum::extract::{Extension, Json, Path, State};
use axum::http::StatusCode;
use entraide_core::services::offre_service::OffreService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::offre_dto::{CreateOffreRequest, OffreDto};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/demandes/{demande_id}/offres",
    tag = "Offres",
    description = "Places a bid on an open demande. One live (pending or accepted) offre per \
                   bidder and demande; a new bid after a rejection is fine.",
    params(("demande_id" = Uuid, Path, description = "Demande to bid on")),
    request_body = CreateOffreRequest,
    responses(
        (status = 201, description = "Offre placed", body = OffreDto),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Cannot bid on own demande", body = ApiErrorResponse),
        (status = 404, description = "Demande not found", body = ApiErrorResponse),
        (status = 409, description = "Demande closed or live offre already exists", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn create_offre(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(demande_id): Path<Uuid>,
    Json(payload): Json<CreateOffreRequest>,
) -> Result<(StatusCode, Json<OffreDto>), ApiError> {
    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::from(e)
    })?;

    let user_id = claims.user_id()?;

    let res = OffreService::create_offre(&state, user_id, demande_id, payload).await?;

    Ok((StatusCode::CREATED, Json(res)))
}
