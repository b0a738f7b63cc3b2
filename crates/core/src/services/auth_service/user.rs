use crate::repositories::token_repository::TokenRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::audit_service::AuditService;
use crate::services::auth_service::token::TokenService;
use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

pub use crate::app_state::AppState;
pub use crate::security::Claims;
pub use entraide_primitives::{
    error::{ApiError, AuthError},
    models::{
        dtos::user_dto::{UpdateProfileRequest, UpdateRoleRequest, UserDto},
        entities::authentication::NewBlacklistedToken,
        entities::user::UserProfileChanges,
    },
};

pub struct UserService;

impl UserService {
    pub async fn current_user(state: &AppState, user_id: Uuid) -> Result<UserDto, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("user.me: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let user = UserRepository::find_by_id(&mut conn, user_id)?
            .ok_or_else(|| ApiError::Auth(AuthError::InvalidToken("User does not exist".into())))?;

        Ok(UserDto::from(user))
    }

    pub async fn update_profile(
        state: &AppState,
        user_id: Uuid,
        payload: UpdateProfileRequest,
    ) -> Result<UserDto, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("user.update: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let bank_account = match &payload.bank_account {
            Some(details) => Some(serde_json::to_value(details).map_err(|_| {
                error!("user.update: bank account serialization failed");
                ApiError::Internal("Profile update failed".into())
            })?),
            None => None,
        };

        let changes = UserProfileChanges {
            display_name: payload.display_name.as_deref(),
            bank_account,
        };

        let user = UserRepository::update_profile(&mut conn, user_id, changes)?;

        info!(user_id = %user.id, "Profile updated");

        Ok(UserDto::from(user))
    }

    /// Deletes the account and blacklists the caller's current access
    /// token so it cannot outlive the row.
    pub async fn delete_account(state: &AppState, claims: Claims) -> Result<(), ApiError> {
        let user_id = claims.user_id()?;

        let mut conn = state.db.get().map_err(|_| {
            error!("user.delete: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let expiration = DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or_else(|| {
            error!("user.delete: invalid exp in claims");
            ApiError::Internal("Invalid token".into())
        })?;

        TokenService::revoke_all_refresh_tokens(&mut conn, user_id)?;
        UserRepository::delete(&mut conn, user_id)?;
        TokenRepository::blacklist_token(
            &mut conn,
            NewBlacklistedToken {
                jti: &claims.jti,
                expires_at: expiration,
            },
        )?;

        info!(user_id = %user_id, "Account deleted");

        Ok(())
    }

    pub async fn set_role(
        state: &AppState,
        admin_id: Uuid,
        target_id: Uuid,
        payload: UpdateRoleRequest,
    ) -> Result<UserDto, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("user.set_role: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let user = UserRepository::set_role(&mut conn, target_id, payload.role)?;

        let _ = AuditService::log_event(
            state,
            Some(admin_id),
            "user.role_changed",
            Some("user"),
            Some(&target_id.to_string()),
            serde_json::json!({ "role": payload.role }),
        )
        .await;

        info!(user_id = %target_id, role = %payload.role, "Role changed");

        Ok(UserDto::from(user))
    }
}
