use crate::app_state::AppState;
use crate::fees::DEFAULT_COMMISSION_RATE;
use crate::repositories::settings_repository::SettingsRepository;
use crate::services::audit_service::AuditService;
use diesel::prelude::*;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::dtos::settings_dto::{
    CommissionRateResponse, UpdateSettingRequest, UpdateSettingResponse,
};
use entraide_primitives::models::entities::app_setting::NewAppSetting;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const COMMISSION_RATE_KEY: &str = "commission_rate";

pub struct SettingsService;

impl SettingsService {
    /// The platform cut in percent. Falls back to the default when the
    /// key is absent or holds a value outside 0..=100.
    pub fn commission_rate(conn: &mut PgConnection) -> Result<i32, ApiError> {
        let setting = SettingsRepository::find_by_key(conn, COMMISSION_RATE_KEY)?;

        let rate = setting
            .and_then(|s| s.value.trim().parse::<i32>().ok())
            .filter(|r| (0..=100).contains(r))
            .unwrap_or_else(|| {
                warn!("settings: commission_rate missing or invalid, using default");
                DEFAULT_COMMISSION_RATE
            });

        Ok(rate)
    }

    pub async fn get_commission_rate(state: &AppState) -> Result<CommissionRateResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("settings.get: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let rate = Self::commission_rate(&mut conn)?;
        Ok(CommissionRateResponse { rate })
    }

    pub async fn update_setting(
        state: &AppState,
        admin_id: Uuid,
        payload: UpdateSettingRequest,
    ) -> Result<UpdateSettingResponse, ApiError> {
        if payload.key == COMMISSION_RATE_KEY {
            let parsed = payload.value.trim().parse::<i32>();
            if !matches!(parsed, Ok(rate) if (0..=100).contains(&rate)) {
                return Err(ApiError::Validation(
                    "commission_rate must be an integer between 0 and 100".into(),
                ));
            }
        }

        let mut conn = state.db.get().map_err(|_| {
            error!("settings.update: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let action = conn.transaction::<_, ApiError, _>(|conn| {
            match SettingsRepository::find_by_key(conn, &payload.key)? {
                Some(_) => {
                    SettingsRepository::update(conn, &payload.key, &payload.value, admin_id)?;
                    Ok("updated")
                }
                None => {
                    SettingsRepository::insert(
                        conn,
                        NewAppSetting {
                            key: &payload.key,
                            value: &payload.value,
                            updated_by: Some(admin_id),
                        },
                    )?;
                    Ok("created")
                }
            }
        })?;

        let _ = AuditService::log_event(
            state,
            Some(admin_id),
            "settings.updated",
            Some("setting"),
            Some(&payload.key),
            serde_json::json!({ "value": payload.value, "action": action }),
        )
        .await;

        info!(key = %payload.key, action, "Setting saved");

        Ok(UpdateSettingResponse {
            key: payload.key,
            action: action.to_string(),
        })
    }
}
