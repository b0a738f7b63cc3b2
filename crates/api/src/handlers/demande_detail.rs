use axum::extract::{Extension, Path, State};
use axum::Json;
use entraide_core::services::demande_service::DemandeService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::demande_dto::DemandeDetailResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/demandes/{demande_id}",
    tag = "Demandes",
    description = "Demande with its offres. The owner sees every offre; anyone else only their own bid.",
    params(("demande_id" = Uuid, Path, description = "Demande to fetch")),
    responses(
        (status = 200, description = "Demande detail", body = DemandeDetailResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "Demande not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn demande_detail(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(demande_id): Path<Uuid>,
) -> Result<Json<DemandeDetailResponse>, ApiError> {
    let user_id = claims.user_id()?;

    let res = DemandeService::detail(&state, user_id, demande_id).await?;

    Ok(Json(res))
}
