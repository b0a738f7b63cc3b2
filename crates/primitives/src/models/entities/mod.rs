pub mod app_setting;
pub mod audit_log;
pub mod authentication;
pub mod demande;
pub mod enum_types;
pub mod meet_session;
pub mod offre;
pub mod payout_request;
pub mod transaction;
pub mod user;

pub use app_setting::*;
pub use audit_log::*;
pub use authentication::*;
pub use demande::*;
pub use enum_types::*;
pub use meet_session::*;
pub use offre::*;
pub use payout_request::*;
pub use transaction::*;
pub use user::*;
