use axum::extract::State;
use axum::Json;
use entraide_core::services::settings_service::SettingsService;
use entraide_core::AppState;
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::settings_dto::CommissionRateResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/settings/commission-rate",
    tag = "Settings",
    responses(
        (status = 200, description = "Current platform commission rate in percent", body = CommissionRateResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(()),
)]
pub async fn commission_rate(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CommissionRateResponse>, ApiError> {
    let res = SettingsService::get_commission_rate(&state).await?;

    Ok(Json(res))
}
