use axum::extract::{Json, State};
use entraide_core::services::auth_service::token::TokenService;
use entraide_core::AppState;
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::auth_dto::{RefreshRequest, RefreshResponse};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "Auth",
    description = "Rotates a refresh token. The presented token is revoked in the same statement \
                   that validates it, so replaying it fails with 401.",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = RefreshResponse),
        (status = 401, description = "Invalid or expired refresh token", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(()),
)]
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::from(e)
    })?;

    let res = TokenService::refresh(&state, payload).await?;

    Ok(Json(res))
}
