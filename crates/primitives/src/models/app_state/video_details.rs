use eyre::Report;
use secrecy::SecretString;
use std::env;

/// Video-call provider settings. The demo deployment signs call tokens
/// locally, so everything here has a usable default.
#[derive(Debug, Clone)]
pub struct VideoInfo {
    pub api_key: String,
    pub api_secret: SecretString,
    pub token_ttl_minutes: i64,
}

impl VideoInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            api_key: env::var("VIDEO_API_KEY").unwrap_or_else(|_| "entraide-demo".into()),

            api_secret: SecretString::new(
                env::var("VIDEO_API_SECRET")
                    .unwrap_or_else(|_| "entraide-demo-video-secret-0123456789abcdef".into())
                    .into(),
            ),

            token_ttl_minutes: env::var("VIDEO_TOKEN_TTL_MINUTES")
                .unwrap_or_else(|_| "120".into())
                .parse()?,
        })
    }
}
