use axum::extract::{Extension, State};
use axum::Json;
use entraide_core::services::demande_service::DemandeService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::demande_dto::BrowseDemandeDto;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/demandes",
    tag = "Demandes",
    description = "Browse feed: open demandes posted by other users, newest first.",
    responses(
        (status = 200, description = "Open demandes", body = [BrowseDemandeDto]),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn list_demandes(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<BrowseDemandeDto>>, ApiError> {
    let user_id = claims.user_id()?;

    let res = DemandeService::browse(&state, user_id).await?;

    Ok(Json(res))
}
