use diesel::prelude::*;
use diesel::sql_types::BigInt;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::entities::enum_types::PayoutStatus;
use entraide_primitives::models::entities::payout_request::{NewPayoutRequest, PayoutRequest};
use entraide_primitives::schema::{payout_requests, users};
use uuid::Uuid;

pub struct PayoutRepository;

impl PayoutRepository {
    pub fn create(
        conn: &mut PgConnection,
        new_payout: NewPayoutRequest,
    ) -> Result<PayoutRequest, ApiError> {
        diesel::insert_into(payout_requests::table)
            .values(&new_payout)
            .get_result::<PayoutRequest>(conn)
            .map_err(ApiError::Database)
    }

    pub fn find_by_id_with_lock(
        conn: &mut PgConnection,
        payout_id: Uuid,
    ) -> Result<PayoutRequest, ApiError> {
        payout_requests::table
            .find(payout_id)
            .for_update()
            .first::<PayoutRequest>(conn)
            .map_err(|e| {
                if matches!(e, diesel::result::Error::NotFound) {
                    ApiError::NotFound("Payout request not found".into())
                } else {
                    ApiError::Database(e)
                }
            })
    }

    pub fn list_by_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Vec<PayoutRequest>, ApiError> {
        payout_requests::table
            .filter(payout_requests::user_id.eq(user_id))
            .order(payout_requests::created_at.desc())
            .load::<PayoutRequest>(conn)
            .map_err(ApiError::Database)
    }

    /// Admin queue with requester identity, oldest first. No status
    /// returns the whole queue.
    pub fn list_with_requester(
        conn: &mut PgConnection,
        status: Option<PayoutStatus>,
    ) -> Result<Vec<(PayoutRequest, String, String)>, ApiError> {
        let mut query = payout_requests::table
            .inner_join(users::table)
            .select((
                PayoutRequest::as_select(),
                users::email,
                users::display_name,
            ))
            .order(payout_requests::created_at.asc())
            .into_boxed();

        if let Some(status) = status {
            query = query.filter(payout_requests::status.eq(status));
        }

        query
            .load::<(PayoutRequest, String, String)>(conn)
            .map_err(ApiError::Database)
    }

    pub fn decide(
        conn: &mut PgConnection,
        payout_id: Uuid,
        status: PayoutStatus,
        processed_by: Uuid,
        reject_reason: Option<&str>,
    ) -> Result<PayoutRequest, ApiError> {
        diesel::update(payout_requests::table.find(payout_id))
            .set((
                payout_requests::status.eq(status),
                payout_requests::processed_by.eq(Some(processed_by)),
                payout_requests::processed_at.eq(Some(chrono::Utc::now())),
                payout_requests::reject_reason.eq(reject_reason),
                payout_requests::updated_at.eq(diesel::dsl::now),
            ))
            .get_result::<PayoutRequest>(conn)
            .map_err(ApiError::Database)
    }

    /// Cents requested but not yet decided (pending or processing).
    pub fn sum_undecided_for_user(conn: &mut PgConnection, user_id: Uuid) -> Result<i64, ApiError> {
        payout_requests::table
            .filter(payout_requests::user_id.eq(user_id))
            .filter(
                payout_requests::status
                    .eq_any([PayoutStatus::Pending, PayoutStatus::Processing]),
            )
            .select(diesel::dsl::sql::<BigInt>(
                "COALESCE(SUM(amount_cents), 0)::BIGINT",
            ))
            .get_result::<i64>(conn)
            .map_err(ApiError::Database)
    }

    pub fn count_pending(conn: &mut PgConnection) -> Result<i64, ApiError> {
        payout_requests::table
            .filter(payout_requests::status.eq(PayoutStatus::Pending))
            .count()
            .get_result::<i64>(conn)
            .map_err(ApiError::Database)
    }
}
