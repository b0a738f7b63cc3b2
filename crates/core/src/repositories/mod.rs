pub mod audit_repository;
pub mod demande_repository;
pub mod offre_repository;
pub mod payout_repository;
pub mod session_repository;
pub mod settings_repository;
pub mod token_repository;
pub mod transaction_repository;
pub mod user_repository;
