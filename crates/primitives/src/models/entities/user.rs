use crate::models::entities::enum_types::UserRole;
use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub role: UserRole,
    pub wallet_balance_cents: i64,
    pub bank_account: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn has_bank_account(&self) -> bool {
        self.bank_account.is_some()
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub display_name: &'a str,
    pub role: UserRole,
}

/// Partial profile update. `None` fields are left untouched.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UserProfileChanges<'a> {
    pub display_name: Option<&'a str>,
    pub bank_account: Option<serde_json::Value>,
}
