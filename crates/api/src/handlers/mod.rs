pub mod active_sessions;
pub mod activity;
pub mod admin_payouts;
pub mod admin_settings;
pub mod admin_user_role;
pub mod call_token;
pub mod cancel_demande;
pub mod commission_rate;
pub mod create_demande;
pub mod create_offre;
pub mod create_payout;
pub mod current_user;
pub mod dashboard;
pub mod delete_account;
pub mod demande_detail;
pub mod end_session;
pub mod get_session;
pub mod health;
pub mod list_demandes;
pub mod login;
pub mod logout;
pub mod my_demandes;
pub mod my_offres;
pub mod my_payouts;
pub mod notifications;
pub mod payment_intent;
pub mod process_payout;
pub mod refresh_token;
pub mod register;
pub mod report_scam;
pub mod settle_session;
pub mod update_offre_status;
pub mod update_profile;
pub mod wallet;
pub mod wallet_transactions;
