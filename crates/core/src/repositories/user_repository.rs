use diesel::prelude::*;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::entities::enum_types::UserRole;
use entraide_primitives::models::entities::user::{NewUser, User, UserProfileChanges};
use entraide_primitives::schema::users;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    pub fn find_by_id(conn: &mut PgConnection, user_id: Uuid) -> Result<Option<User>, ApiError> {
        users::table
            .find(user_id)
            .first::<User>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    /// Row-locked read for balance mutations. The caller must hold a
    /// transaction.
    pub fn find_by_id_with_lock(conn: &mut PgConnection, user_id: Uuid) -> Result<User, ApiError> {
        users::table
            .find(user_id)
            .for_update()
            .first::<User>(conn)
            .map_err(|e| {
                if matches!(e, diesel::result::Error::NotFound) {
                    ApiError::NotFound("User not found".into())
                } else {
                    ApiError::Database(e)
                }
            })
    }

    pub fn display_names(
        conn: &mut PgConnection,
        user_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, String)>, ApiError> {
        users::table
            .filter(users::id.eq_any(user_ids))
            .select((users::id, users::display_name))
            .load::<(Uuid, String)>(conn)
            .map_err(ApiError::Database)
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        user_email: &str,
    ) -> Result<Option<User>, ApiError> {
        users::table
            .filter(users::email.eq(user_email))
            .first::<User>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    pub fn create(conn: &mut PgConnection, new_user: NewUser) -> Result<User, ApiError> {
        diesel::insert_into(users::table)
            .values(&new_user)
            .get_result::<User>(conn)
            .map_err(|e| {
                if matches!(
                    e,
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        _
                    )
                ) {
                    ApiError::Conflict("Email already registered".into())
                } else {
                    ApiError::Database(e)
                }
            })
    }

    pub fn update_profile(
        conn: &mut PgConnection,
        user_id: Uuid,
        changes: UserProfileChanges,
    ) -> Result<User, ApiError> {
        diesel::update(users::table.find(user_id))
            .set((changes, users::updated_at.eq(diesel::dsl::now)))
            .get_result::<User>(conn)
            .map_err(|e| {
                if matches!(e, diesel::result::Error::NotFound) {
                    ApiError::NotFound("User not found".into())
                } else {
                    ApiError::Database(e)
                }
            })
    }

    pub fn set_role(
        conn: &mut PgConnection,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<User, ApiError> {
        diesel::update(users::table.find(user_id))
            .set((users::role.eq(role), users::updated_at.eq(diesel::dsl::now)))
            .get_result::<User>(conn)
            .map_err(|e| {
                if matches!(e, diesel::result::Error::NotFound) {
                    ApiError::NotFound("User not found".into())
                } else {
                    ApiError::Database(e)
                }
            })
    }

    /// Atomic in-place increment. Never read-modify-write balances from
    /// application code.
    pub fn credit_wallet(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount_cents: i64,
    ) -> Result<(), ApiError> {
        diesel::update(users::table.find(user_id))
            .set((
                users::wallet_balance_cents.eq(users::wallet_balance_cents + amount_cents),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)
            .map_err(ApiError::Database)?;
        Ok(())
    }

    pub fn debit_wallet(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount_cents: i64,
    ) -> Result<(), ApiError> {
        diesel::update(users::table.find(user_id))
            .set((
                users::wallet_balance_cents.eq(users::wallet_balance_cents - amount_cents),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)
            .map_err(ApiError::Database)?;
        Ok(())
    }

    pub fn delete(conn: &mut PgConnection, user_id: Uuid) -> Result<(), ApiError> {
        let deleted = diesel::delete(users::table.find(user_id))
            .execute(conn)
            .map_err(ApiError::Database)?;
        if deleted == 0 {
            return Err(ApiError::NotFound("User not found".into()));
        }
        Ok(())
    }

    pub fn count_all(conn: &mut PgConnection) -> Result<i64, ApiError> {
        users::table
            .count()
            .get_result::<i64>(conn)
            .map_err(ApiError::Database)
    }
}
