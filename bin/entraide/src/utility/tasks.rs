use axum::Router;
use axum_prometheus::{metrics_exporter_prometheus::PrometheusHandle, PrometheusMetricLayer};
use entraide_core::fees::DEFAULT_COMMISSION_RATE;
use entraide_core::repositories::settings_repository::SettingsRepository;
use entraide_core::services::settings_service::COMMISSION_RATE_KEY;
use entraide_core::AppState;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::entities::app_setting::NewAppSetting;
use eyre::Report;
use http::HeaderValue;
use std::env;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub fn build_cors() -> Result<CorsLayer, Report> {
    let origins = env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into());

    let allowed_origins = origins
        .split(',')
        .map(|s| s.trim().parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| eyre::eyre!("Invalid CORS origin: {}", e))?;

    Ok(CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(allowed_origins))
}

pub fn load_env() {
    if dotenvy::dotenv().is_ok() {
        info!("Loaded .env file");
    } else {
        info!("No .env file found, using system environment");
    }
}

pub fn build_router(
    state: Arc<AppState>,
    metric_layer: PrometheusMetricLayer<'static>,
    metric_handle: PrometheusHandle,
) -> Result<Router, Report> {
    let cors = build_cors()?;

    Ok(entraide_api::create_router(state, metric_layer, metric_handle).layer(cors))
}

pub async fn initialize_system(state: &Arc<AppState>) {
    if let Err(e) = seed_default_settings(state) {
        tracing::warn!(
            "Failed to seed default settings: {}. Continuing with built-in defaults.",
            e
        );
    } else {
        info!("Default settings verified");
    }
}

/// Inserts the commission rate row on first boot so operators can see and
/// edit it; an existing row is left alone.
fn seed_default_settings(state: &Arc<AppState>) -> Result<(), ApiError> {
    let mut conn = state
        .db
        .get()
        .map_err(|_| ApiError::DatabaseConnection("Database unavailable".into()))?;

    if SettingsRepository::find_by_key(&mut conn, COMMISSION_RATE_KEY)?.is_none() {
        SettingsRepository::insert(
            &mut conn,
            NewAppSetting {
                key: COMMISSION_RATE_KEY,
                value: &DEFAULT_COMMISSION_RATE.to_string(),
                updated_by: None,
            },
        )?;
        info!(
            "Seeded default commission rate ({}%)",
            DEFAULT_COMMISSION_RATE
        );
    }

    Ok(())
}
