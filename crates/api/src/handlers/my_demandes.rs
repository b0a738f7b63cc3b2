use axum::extract::{Extension, State};
use axum::Json;
use entraide_core::services::demande_service::DemandeService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::demande_dto::MyDemandeDto;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/demandes/mine",
    tag = "Demandes",
    responses(
        (status = 200, description = "Own demandes with pending offre counts", body = [MyDemandeDto]),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn my_demandes(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<MyDemandeDto>>, ApiError> {
    let user_id = claims.user_id()?;

    let res = DemandeService::my_demandes(&state, user_id).await?;

    Ok(Json(res))
}
