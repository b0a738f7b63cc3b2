use chrono::{DateTime, Duration, Utc};
use entraide_primitives::error::ApiError;
use entraide_primitives::models::app_state::video_details::VideoInfo;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

/// Token-issuing side of the video-call provider. Call tokens are signed
/// locally; the provider never sees a network request from this backend.
#[derive(Clone)]
pub struct VideoCallClient {
    api_key: String,
    api_secret: SecretString,
    token_ttl_minutes: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct CallClaims {
    sub: String,
    call_id: String,
    iss: String,
    iat: i64,
    exp: i64,
}

impl VideoCallClient {
    pub fn new(config: &VideoInfo) -> Self {
        Self {
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            token_ttl_minutes: config.token_ttl_minutes,
        }
    }

    /// Signs a join token scoped to one call room for one user.
    pub fn issue_call_token(
        &self,
        user_id: Uuid,
        call_id: &str,
    ) -> Result<(String, DateTime<Utc>), ApiError> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.token_ttl_minutes);

        let claims = CallClaims {
            sub: user_id.to_string(),
            call_id: call_id.to_string(),
            iss: self.api_key.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.api_secret.expose_secret().as_bytes()),
        )
        .map_err(|e| {
            error!("Call token encoding error: {}", e);
            ApiError::Token("Call token creation failed".into())
        })?;

        Ok((token, expires_at))
    }
}
