use crate::models::entities::enum_types::UserRole;
use crate::models::entities::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "Alice Martin")]
    pub display_name: String,
    pub role: UserRole,
    #[schema(example = 12500)]
    pub wallet_balance_cents: i64,
    pub has_bank_account: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        let has_bank_account = user.has_bank_account();
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            wallet_balance_cents: user.wallet_balance_cents,
            has_bank_account,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct BankAccountDto {
    #[schema(example = "FR7630006000011234567890189")]
    #[validate(length(min = 15, max = 34))]
    pub iban: String,

    #[schema(example = "BNPAFRPP")]
    #[validate(length(min = 8, max = 11))]
    pub bic: String,

    #[schema(example = "Alice Martin")]
    #[validate(length(min = 2, max = 100))]
    pub holder_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 60))]
    pub display_name: Option<String>,

    #[validate(nested)]
    pub bank_account: Option<BankAccountDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}
