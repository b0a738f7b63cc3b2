use axum::extract::{Json, State};
use entraide_core::services::auth_service::login::LoginService;
use entraide_core::AppState;
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::auth_dto::{AuthResponse, LoginRequest};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    description = "Exchanges email and password for an access token and a rotating refresh token. \
                   Unknown emails and wrong passwords both return 401 without distinguishing the two.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 401, description = "Invalid credentials", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(()),
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::from(e)
    })?;

    let res = LoginService::login(&state, payload).await?;

    Ok(Json(res))
}
