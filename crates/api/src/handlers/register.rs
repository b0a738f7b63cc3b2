use axum::extract::{Json, State};
use axum::http::StatusCode;
use entraide_core::services::auth_service::register::RegisterService;
use entraide_core::AppState;
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::auth_dto::{AuthResponse, RegisterRequest};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, tokens issued", body = AuthResponse),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 409, description = "Email already registered", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(()),
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::from(e)
    })?;

    let res = RegisterService::register(&state, payload).await?;

    Ok((StatusCode::CREATED, Json(res)))
}
