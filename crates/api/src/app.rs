use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    active_sessions::active_sessions, activity::activity, admin_payouts::admin_payouts,
    admin_settings::admin_settings, admin_user_role::admin_user_role, call_token::call_token,
    cancel_demande::cancel_demande, commission_rate::commission_rate,
    create_demande::create_demande, create_offre::create_offre, create_payout::create_payout,
    current_user::current_user, dashboard::dashboard, delete_account::delete_account,
    demande_detail::demande_detail, end_session::end_session, get_session::get_session,
    health::health_check, list_demandes::list_demandes, login::login, logout::logout,
    my_demandes::my_demandes, my_offres::my_offres, my_payouts::my_payouts,
    notifications::notifications, payment_intent::payment_intent, process_payout::process_payout,
    register::register, report_scam::report_scam, settle_session::settle_session,
    update_offre_status::update_offre_status, update_profile::update_profile, wallet::wallet,
    wallet_transactions::wallet_transactions,
};
use axum::{middleware, response::IntoResponse, routing::get, routing::post, Router};
use axum_prometheus::{metrics_exporter_prometheus::PrometheusHandle, PrometheusMetricLayer};
use entraide_core::{AppState, SecurityConfig};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};

pub fn create_router(
    state: Arc<AppState>,
    metric_layer: PrometheusMetricLayer<'static>,
    metric_handle: PrometheusHandle,
) -> Router {
    // rate limiting configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2) // 2 requests per second = 120 per minute
            .burst_size(10)
            .finish()
            .unwrap(),
    );

    // public routes (no authentication)
    let public_router = create_public_routers();

    // protected routes (require JWT authentication)
    let protected_router = create_secured_routers(&state);

    let mut router = Router::new()
        .merge(public_router)
        .merge(protected_router)
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(metric_layer)
        .layer(axum::extract::DefaultBodyLimit::max(2 * 1024 * 1024)) // 2MB limit
        .layer(middleware::from_fn(https_redirect_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http()),
        );

    // disable rate limiting in test environment to avoid "Unable To Extract Key!" errors
    if std::env::var("APP_ENV").unwrap_or_default() != "test" {
        router = router.layer(GovernorLayer::new(governor_conf));
    }

    router.with_state(state)
}

fn create_secured_routers(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let protected_router = Router::new()
        .route("/api/auth/logout", post(logout))
        .route(
            "/api/me",
            get(current_user)
                .patch(update_profile)
                .delete(delete_account),
        )
        .route("/api/demandes", post(create_demande).get(list_demandes))
        .route("/api/demandes/mine", get(my_demandes))
        .route("/api/demandes/{demande_id}", get(demande_detail))
        .route("/api/demandes/{demande_id}/cancel", post(cancel_demande))
        .route("/api/demandes/{demande_id}/offres", post(create_offre))
        .route("/api/offres/mine", get(my_offres))
        .route(
            "/api/offres/{offre_id}/status",
            axum::routing::patch(update_offre_status),
        )
        .route("/api/sessions/active", get(active_sessions))
        .route("/api/sessions/{session_id}", get(get_session))
        .route("/api/sessions/{session_id}/call-token", post(call_token))
        .route(
            "/api/sessions/{session_id}/payment-intent",
            post(payment_intent),
        )
        .route("/api/sessions/{session_id}/end", post(end_session))
        .route("/api/sessions/{session_id}/report-scam", post(report_scam))
        .route("/api/sessions/{session_id}/settle", post(settle_session))
        .route("/api/wallet", get(wallet))
        .route("/api/wallet/transactions", get(wallet_transactions))
        .route("/api/wallet/payouts", post(create_payout).get(my_payouts))
        .route("/api/dashboard", get(dashboard))
        .route("/api/notifications", get(notifications))
        .route("/api/activity", get(activity))
        .route("/api/admin/payouts", get(admin_payouts))
        .route(
            "/api/admin/payouts/{payout_id}/process",
            post(process_payout),
        )
        .route(
            "/api/admin/users/{user_id}",
            axum::routing::patch(admin_user_role),
        )
        .route("/api/admin/settings", axum::routing::put(admin_settings))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            SecurityConfig::auth_middleware,
        ));
    protected_router
}

fn create_public_routers() -> Router<Arc<AppState>> {
    let public_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route(
            "/api/auth/refresh",
            post(crate::handlers::refresh_token::refresh_token),
        )
        .route("/api/settings/commission-rate", get(commission_rate))
        .route("/api/health", get(health_check));
    public_router
}

async fn https_redirect_middleware(
    req: axum::extract::Request,
    next: middleware::Next,
) -> Result<axum::response::Response, (axum::http::StatusCode, String)> {
    // Check if we are in production
    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

    if env == "production" {
        let headers = req.headers();
        let proto = headers
            .get("x-forwarded-proto")
            .and_then(|h| h.to_str().ok());

        if let Some("http") = proto {
            let host = headers
                .get("host")
                .and_then(|h| h.to_str().ok())
                .unwrap_or("localhost");

            let uri = req.uri();
            let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("");
            let redirect_url = format!("https://{}{}", host, path_and_query);

            return Ok(axum::response::Redirect::permanent(&redirect_url).into_response());
        }
    }

    Ok(next.run(req).await)
}
