use crate::repositories::token_repository::TokenRepository;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::{error, info};

pub use crate::app_state::AppState;
pub use crate::security::Claims;
pub use entraide_primitives::{
    error::ApiError, models::entities::authentication::NewBlacklistedToken,
};

pub struct LogoutService;

impl LogoutService {
    pub async fn logout(state: &AppState, claims: Claims) -> Result<(), ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("auth.logout: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let expiration = DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or_else(|| {
            error!("auth.logout: invalid exp in claims");
            ApiError::Internal("Invalid token".into())
        })?;

        Self::blacklist_token(&mut conn, &claims.jti, expiration)?;

        Ok(())
    }

    /// Blacklists the access token until its natural expiry.
    fn blacklist_token(
        conn: &mut PgConnection,
        jti: &str,
        expiration: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        TokenRepository::blacklist_token(
            conn,
            NewBlacklistedToken {
                jti,
                expires_at: expiration,
            },
        )
        .map_err(|_| {
            error!("auth.logout: failed to persist token blacklist");
            ApiError::Internal("Logout failed".into())
        })?;

        info!("auth.logout: token invalidated");

        Ok(())
    }
}
