use axum::extract::{Extension, Json, State};
use entraide_core::services::settings_service::SettingsService;
use entraide_core::{AppState, Claims, SecurityConfig};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::settings_dto::{UpdateSettingRequest, UpdateSettingResponse};
use std::sync::Arc;
use tracing::error;

#[utoipa::path(
    put,
    path = "/api/admin/settings",
    tag = "Admin",
    description = "Creates or updates one key in app_settings. `commission_rate` is validated to \
                   an integer between 0 and 100; other keys are stored as given.",
    request_body = UpdateSettingRequest,
    responses(
        (status = 200, description = "Setting saved", body = UpdateSettingResponse),
        (status = 400, description = "Invalid value for the key", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn admin_settings(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateSettingRequest>,
) -> Result<Json<UpdateSettingResponse>, ApiError> {
    let mut conn = state.db.get().map_err(|e| {
        error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let admin = SecurityConfig::require_admin(&mut conn, &claims)?;
    drop(conn);

    let res = SettingsService::update_setting(&state, admin.id, payload).await?;

    Ok(Json(res))
}
