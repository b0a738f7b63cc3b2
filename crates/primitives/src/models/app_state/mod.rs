pub mod app_config;
pub mod jwt_details;
pub mod payments_details;
pub mod video_details;

pub use app_config::*;
pub use jwt_details::*;
pub use payments_details::*;
pub use video_details::*;
