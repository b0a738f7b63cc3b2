use diesel::prelude::*;
use diesel::sql_types::BigInt;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::entities::enum_types::TransactionPayoutStatus;
use entraide_primitives::models::entities::transaction::{NewTransaction, Transaction};
use entraide_primitives::schema::transactions;
use uuid::Uuid;

pub struct TransactionRepository;

impl TransactionRepository {
    /// Idempotent insert keyed on session_id. Returns the row plus a
    /// flag telling the caller whether this call actually inserted it;
    /// wallet credits must only happen when the flag is true.
    pub fn create(
        conn: &mut PgConnection,
        new_transaction: NewTransaction,
    ) -> Result<(Transaction, bool), ApiError> {
        let inserted = diesel::insert_into(transactions::table)
            .values(&new_transaction)
            .on_conflict(transactions::session_id)
            .do_nothing()
            .get_result::<Transaction>(conn)
            .optional()
            .map_err(ApiError::Database)?;

        match inserted {
            Some(transaction) => Ok((transaction, true)),
            None => {
                let existing = transactions::table
                    .filter(transactions::session_id.eq(new_transaction.session_id))
                    .first::<Transaction>(conn)
                    .map_err(ApiError::Database)?;
                Ok((existing, false))
            }
        }
    }

    pub fn find_by_session(
        conn: &mut PgConnection,
        session_id: Uuid,
    ) -> Result<Option<Transaction>, ApiError> {
        transactions::table
            .filter(transactions::session_id.eq(session_id))
            .first::<Transaction>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    pub fn list_for_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Vec<Transaction>, ApiError> {
        transactions::table
            .filter(
                transactions::demandeur_id
                    .eq(user_id)
                    .or(transactions::offreur_id.eq(user_id)),
            )
            .order(transactions::created_at.desc())
            .load::<Transaction>(conn)
            .map_err(ApiError::Database)
    }

    /// Lifetime provider earnings. SUM over BIGINT widens to NUMERIC in
    /// Postgres, so the cast keeps diesel's i64 mapping.
    pub fn sum_provider_cents_for_offreur(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<i64, ApiError> {
        transactions::table
            .filter(transactions::offreur_id.eq(user_id))
            .select(diesel::dsl::sql::<BigInt>(
                "COALESCE(SUM(provider_cents), 0)::BIGINT",
            ))
            .get_result::<i64>(conn)
            .map_err(ApiError::Database)
    }

    pub fn sum_commission_cents(conn: &mut PgConnection) -> Result<i64, ApiError> {
        transactions::table
            .select(diesel::dsl::sql::<BigInt>(
                "COALESCE(SUM(commission_cents), 0)::BIGINT",
            ))
            .get_result::<i64>(conn)
            .map_err(ApiError::Database)
    }

    pub fn mark_payouts_completed_for_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<usize, ApiError> {
        diesel::update(
            transactions::table
                .filter(transactions::offreur_id.eq(user_id))
                .filter(transactions::payout_status.eq(TransactionPayoutStatus::Pending)),
        )
        .set(transactions::payout_status.eq(TransactionPayoutStatus::Completed))
        .execute(conn)
        .map_err(ApiError::Database)
    }
}
