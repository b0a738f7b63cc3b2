use axum::extract::{Extension, State};
use axum::http::StatusCode;
use entraide_core::services::auth_service::user::UserService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/api/me",
    tag = "User",
    description = "Deletes the account. Demandes, offres, sessions and refresh tokens go with it \
                   through FK cascades, and the current access token is blacklisted.",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<StatusCode, ApiError> {
    UserService::delete_account(&state, claims).await?;

    Ok(StatusCode::NO_CONTENT)
}
