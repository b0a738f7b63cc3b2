use axum::extract::{Extension, Json, State};
use axum::http::StatusCode;
use entraide_core::services::demande_service::DemandeService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::demande_dto::{CreateDemandeRequest, DemandeDto};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/demandes",
    tag = "Demandes",
    description = "Posts a paid help request. The price is what the requester is willing to pay in \
                   cents; bidders may offer a different price.",
    request_body = CreateDemandeRequest,
    responses(
        (status = 201, description = "Demande posted", body = DemandeDto),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn create_demande(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateDemandeRequest>,
) -> Result<(StatusCode, Json<DemandeDto>), ApiError> {
    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::from(e)
    })?;

    let user_id = claims.user_id()?;

    let res = DemandeService::create(&state, user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(res)))
}
