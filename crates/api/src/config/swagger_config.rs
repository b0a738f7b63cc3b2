use crate::handlers::{
    active_sessions::__path_active_sessions, activity::__path_activity,
    admin_payouts::__path_admin_payouts, admin_settings::__path_admin_settings,
    admin_user_role::__path_admin_user_role, call_token::__path_call_token,
    cancel_demande::__path_cancel_demande, commission_rate::__path_commission_rate,
    create_demande::__path_create_demande, create_offre::__path_create_offre,
    create_payout::__path_create_payout, current_user::__path_current_user,
    dashboard::__path_dashboard, delete_account::__path_delete_account,
    demande_detail::__path_demande_detail, end_session::__path_end_session,
    get_session::__path_get_session, health::__path_health_check,
    list_demandes::__path_list_demandes, login::__path_login, logout::__path_logout,
    my_demandes::__path_my_demandes, my_offres::__path_my_offres, my_payouts::__path_my_payouts,
    notifications::__path_notifications, payment_intent::__path_payment_intent,
    process_payout::__path_process_payout, refresh_token::__path_refresh_token,
    register::__path_register, report_scam::__path_report_scam,
    settle_session::__path_settle_session, update_offre_status::__path_update_offre_status,
    update_profile::__path_update_profile, wallet::__path_wallet,
    wallet_transactions::__path_wallet_transactions,
};
use entraide_primitives::models::dtos::auth_dto::RegisterRequest;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        register, login, refresh_token, logout, current_user, update_profile,
        delete_account, admin_user_role, commission_rate, admin_settings,
        create_demande, list_demandes, my_demandes, demande_detail, cancel_demande,
        create_offre, my_offres, update_offre_status,
        get_session, active_sessions, call_token, payment_intent, end_session,
        report_scam, settle_session,
        wallet, wallet_transactions, create_payout, my_payouts,
        admin_payouts, process_payout,
        dashboard, notifications, activity, health_check
    ),
    components(schemas(RegisterRequest)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and token lifecycle"),
        (name = "User", description = "Profile management"),
        (name = "Settings", description = "Platform settings"),
        (name = "Demandes", description = "Help requests"),
        (name = "Offres", description = "Bids on demandes"),
        (name = "Sessions", description = "Video sessions and settlement"),
        (name = "Wallet", description = "Balances, transactions and payouts"),
        (name = "Admin", description = "Operator endpoints"),
        (name = "Views", description = "Dashboard and feeds"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // Define the security scheme in components.securitySchemes
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
