use crate::models::app_state::jwt_details::JWTInfo;
use crate::models::app_state::payments_details::PaymentsInfo;
use crate::models::app_state::video_details::VideoInfo;
use eyre::Report;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_details: JWTInfo,

    pub app_url: String,

    pub video_details: VideoInfo,

    pub payments_details: PaymentsInfo,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            jwt_details: JWTInfo::new()?,

            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".into()),

            video_details: VideoInfo::new()?,

            payments_details: PaymentsInfo::new()?,
        })
    }
}
