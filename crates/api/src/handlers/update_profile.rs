use axum::extract::{Extension, Json, State};
use entraide_core::services::auth_service::user::UserService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::user_dto::{UpdateProfileRequest, UserDto};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    patch,
    path = "/api/me",
    tag = "User",
    description = "Partial profile update. Bank details set here are required before a payout can \
                   be requested; payout requests snapshot them at request time.",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserDto),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserDto>, ApiError> {
    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::from(e)
    })?;

    let user_id = claims.user_id()?;

    let res = UserService::update_profile(&state, user_id, payload).await?;

    Ok(Json(res))
}
