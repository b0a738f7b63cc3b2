pub mod auth_dto;
pub mod demande_dto;
pub mod offre_dto;
pub mod payout_dto;
pub mod session_dto;
pub mod settings_dto;
pub mod transaction_dto;
pub mod user_dto;
pub mod views_dto;
pub mod wallet_dto;

pub use auth_dto::*;
pub use demande_dto::*;
pub use offre_dto::*;
pub use payout_dto::*;
pub use session_dto::*;
pub use settings_dto::*;
pub use transaction_dto::*;
pub use user_dto::*;
pub use views_dto::*;
pub use wallet_dto::*;
