use crate::app_state::AppState;
use crate::repositories::token_repository::TokenRepository;
use crate::security::SecurityConfig;
use chrono::{Duration, Utc};
use diesel::prelude::*;
use entraide_primitives::error::{ApiError, AuthError};
use entraide_primitives::models::dtos::auth_dto::{RefreshRequest, RefreshResponse, RefreshResult};
use entraide_primitives::models::entities::authentication::NewRefreshToken;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::error;
use uuid::Uuid;

pub struct TokenService;

impl TokenService {
    /// Issues a 64-char opaque token; only its SHA-256 hex lands in the
    /// database.
    pub fn generate_refresh_token(
        conn: &mut PgConnection,
        user_uuid: Uuid,
    ) -> Result<String, ApiError> {
        use rand::rngs::OsRng;

        let raw_token: String = OsRng
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();

        let hashed_token = Self::hash_token(&raw_token);
        let expiry = Utc::now() + Duration::days(7);

        TokenRepository::create_refresh_token(
            conn,
            NewRefreshToken {
                user_id: user_uuid,
                token_hash: &hashed_token,
                expires_at: expiry,
            },
        )?;

        Ok(raw_token)
    }

    /// One-shot rotation: the presented token is revoked and replaced
    /// atomically, so a replayed token always fails.
    pub fn validate_and_rotate_refresh_token(
        conn: &mut PgConnection,
        raw_token: &str,
    ) -> Result<RefreshResult, ApiError> {
        let hashed_token = Self::hash_token(raw_token);

        let token_record = TokenRepository::rotate_refresh_token(conn, &hashed_token)?;

        if let Some(token_record) = token_record {
            let new_token = Self::generate_refresh_token(conn, token_record.user_id)?;

            Ok(RefreshResult {
                user_id: token_record.user_id,
                new_refresh_token: new_token,
            })
        } else {
            Err(ApiError::Auth(AuthError::InvalidToken(
                "Invalid or expired refresh token".into(),
            )))
        }
    }

    pub async fn refresh(
        state: &AppState,
        payload: RefreshRequest,
    ) -> Result<RefreshResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("auth.refresh: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let rotated = conn.transaction::<_, ApiError, _>(|conn| {
            Self::validate_and_rotate_refresh_token(conn, &payload.refresh_token)
        })?;

        let token =
            SecurityConfig::create_token(state, &rotated.user_id.to_string()).map_err(|_| {
                error!("auth.refresh: jwt creation failed");
                ApiError::Internal("Authentication service unavailable".into())
            })?;

        Ok(RefreshResponse {
            token,
            refresh_token: rotated.new_refresh_token,
        })
    }

    pub fn revoke_all_refresh_tokens(
        conn: &mut PgConnection,
        user_uuid: Uuid,
    ) -> Result<(), ApiError> {
        TokenRepository::revoke_all_user_tokens(conn, user_uuid)
    }

    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}
