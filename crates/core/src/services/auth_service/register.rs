use crate::repositories::user_repository::UserRepository;
use crate::services::audit_service::AuditService;
use crate::services::auth_service::token::TokenService;
use argon2::{Argon2, Params};
use password_hash::PasswordHasher;
use secrecy::{ExposeSecret, SecretString};
use tracing::{error, info};

pub use crate::app_state::AppState;
pub use crate::security::SecurityConfig;
pub use entraide_primitives::{
    error::ApiError,
    models::{
        dtos::auth_dto::{AuthResponse, RegisterRequest},
        dtos::user_dto::UserDto,
        entities::enum_types::UserRole,
        entities::user::NewUser,
    },
};

pub struct RegisterService;

impl RegisterService {
    pub async fn register(
        state: &AppState,
        mut payload: RegisterRequest,
    ) -> Result<AuthResponse, ApiError> {
        payload = payload.normalize();

        let mut conn = state.db.get().map_err(|_| {
            error!("auth.register: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let password = SecretString::new(payload.password.into());
        let password_hash = Self::hash_password(&password)?;

        let new_user = NewUser {
            email: &payload.email,
            password_hash: &password_hash,
            display_name: &payload.display_name,
            role: UserRole::User,
        };

        let user = UserRepository::create(&mut conn, new_user)?;

        let token = SecurityConfig::create_token(state, &user.id.to_string()).map_err(|_| {
            error!("auth.register: jwt generation failed");
            ApiError::Internal("Authentication service error".into())
        })?;

        let refresh_token =
            TokenService::generate_refresh_token(&mut conn, user.id).map_err(|_| {
                error!("auth.register: refresh token generation failed");
                ApiError::Internal("Authentication service error".into())
            })?;

        let _ = AuditService::log_event(
            state,
            Some(user.id),
            "auth.register",
            Some("user"),
            Some(&user.id.to_string()),
            serde_json::json!({ "email": user.email }),
        )
        .await;

        info!(user_id = %user.id, "User registered successfully");

        Ok(AuthResponse {
            token,
            refresh_token,
            user: UserDto::from(user),
        })
    }

    fn hash_password(password: &SecretString) -> Result<String, ApiError> {
        let argon2 = Self::create_argon2()?;
        let salt = argon2::password_hash::SaltString::generate(&mut rand_core::OsRng);

        argon2
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| {
                error!("auth.register: password hashing failed");
                ApiError::Internal("Credential processing failed".into())
            })
    }

    pub fn create_argon2() -> Result<Argon2<'static>, ApiError> {
        let params = Params::new(
            65536, // 64 MiB memory
            3,     // iterations
            1,     // parallelism
            None,
        )
        .map_err(|e| {
            error!("Argon2 params error: {}", e);
            ApiError::Internal("Encryption configuration error".to_string())
        })?;
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Ok(argon2)
    }
}
