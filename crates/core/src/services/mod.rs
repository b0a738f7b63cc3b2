pub mod audit_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod demande_service;
pub mod offre_service;
pub mod payout_service;
pub mod session_service;
pub mod settings_service;
pub mod settlement_service;
pub mod wallet_service;
