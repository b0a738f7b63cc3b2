use axum::extract::{Extension, State};
use axum::Json;
use entraide_core::services::offre_service::OffreService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::offre_dto::MyOffreDto;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/offres/mine",
    tag = "Offres",
    responses(
        (status = 200, description = "Own bids with their demande titles", body = [MyOffreDto]),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn my_offres(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<MyOffreDto>>, ApiError> {
    let user_id = claims.user_id()?;

    let res = OffreService::my_offres(&state, user_id).await?;

    Ok(Json(res))
}
