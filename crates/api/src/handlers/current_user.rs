use axum::extract::{Extension, State};
use axum::Json;
use entraide_core::services::auth_service::user::UserService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::user_dto::UserDto;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/me",
    tag = "User",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = UserDto),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserDto>, ApiError> {
    let user_id = claims.user_id()?;

    let res = UserService::current_user(&state, user_id).await?;

    Ok(Json(res))
}
