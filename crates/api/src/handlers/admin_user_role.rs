use axum::extract::{Extension, Json, Path, State};
use entraide_core::services::auth_service::user::UserService;
use entraide_core::{AppState, Claims, SecurityConfig};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::user_dto::{UpdateRoleRequest, UserDto};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

#[utoipa::path(
    patch,
    path = "/api/admin/users/{user_id}",
    tag = "Admin",
    params(("user_id" = Uuid, Path, description = "User to change")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = UserDto),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ApiErrorResponse),
        (status = 404, description = "User not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn admin_user_role(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<UserDto>, ApiError> {
    let mut conn = state.db.get().map_err(|e| {
        error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let admin = SecurityConfig::require_admin(&mut conn, &claims)?;
    drop(conn);

    let res = UserService::set_role(&state, admin.id, user_id, payload).await?;

    Ok(Json(res))
}
