use diesel::prelude::*;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::entities::enum_types::{MeetSessionStatus, SessionPaymentStatus};
use entraide_primitives::models::entities::meet_session::{MeetSession, NewMeetSession};
use entraide_primitives::schema::meet_sessions;
use uuid::Uuid;

pub struct SessionRepository;

impl SessionRepository {
    /// Insert guarded by the unique constraint on offre_id. When a
    /// concurrent accept already created the session, the insert is a
    /// no-op and the existing row is returned instead.
    pub fn create_idempotent(
        conn: &mut PgConnection,
        new_session: NewMeetSession,
    ) -> Result<MeetSession, ApiError> {
        let offre_id = new_session.offre_id;

        diesel::insert_into(meet_sessions::table)
            .values(&new_session)
            .on_conflict(meet_sessions::offre_id)
            .do_nothing()
            .execute(conn)
            .map_err(ApiError::Database)?;

        meet_sessions::table
            .filter(meet_sessions::offre_id.eq(offre_id))
            .first::<MeetSession>(conn)
            .map_err(ApiError::Database)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        session_id: Uuid,
    ) -> Result<Option<MeetSession>, ApiError> {
        meet_sessions::table
            .find(session_id)
            .first::<MeetSession>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    pub fn find_by_id_with_lock(
        conn: &mut PgConnection,
        session_id: Uuid,
    ) -> Result<MeetSession, ApiError> {
        meet_sessions::table
            .find(session_id)
            .for_update()
            .first::<MeetSession>(conn)
            .map_err(|e| {
                if matches!(e, diesel::result::Error::NotFound) {
                    ApiError::NotFound("Session not found".into())
                } else {
                    ApiError::Database(e)
                }
            })
    }

    pub fn list_active_for_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Vec<MeetSession>, ApiError> {
        meet_sessions::table
            .filter(
                meet_sessions::demandeur_id
                    .eq(user_id)
                    .or(meet_sessions::offreur_id.eq(user_id)),
            )
            .filter(meet_sessions::status.eq(MeetSessionStatus::Active))
            .order(meet_sessions::started_at.desc())
            .load::<MeetSession>(conn)
            .map_err(ApiError::Database)
    }

    pub fn list_for_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Vec<MeetSession>, ApiError> {
        meet_sessions::table
            .filter(
                meet_sessions::demandeur_id
                    .eq(user_id)
                    .or(meet_sessions::offreur_id.eq(user_id)),
            )
            .order(meet_sessions::started_at.desc())
            .load::<MeetSession>(conn)
            .map_err(ApiError::Database)
    }

    /// Moves the session to a terminal status and stamps ended_at.
    pub fn close(
        conn: &mut PgConnection,
        session_id: Uuid,
        status: MeetSessionStatus,
    ) -> Result<(), ApiError> {
        diesel::update(meet_sessions::table.find(session_id))
            .set((
                meet_sessions::status.eq(status),
                meet_sessions::ended_at.eq(Some(chrono::Utc::now())),
                meet_sessions::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)
            .map_err(ApiError::Database)?;
        Ok(())
    }

    pub fn set_payment_status(
        conn: &mut PgConnection,
        session_id: Uuid,
        payment_status: SessionPaymentStatus,
    ) -> Result<(), ApiError> {
        diesel::update(meet_sessions::table.find(session_id))
            .set((
                meet_sessions::payment_status.eq(payment_status),
                meet_sessions::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)
            .map_err(ApiError::Database)?;
        Ok(())
    }

    pub fn count_active_for_user(conn: &mut PgConnection, user_id: Uuid) -> Result<i64, ApiError> {
        meet_sessions::table
            .filter(
                meet_sessions::demandeur_id
                    .eq(user_id)
                    .or(meet_sessions::offreur_id.eq(user_id)),
            )
            .filter(meet_sessions::status.eq(MeetSessionStatus::Active))
            .count()
            .get_result::<i64>(conn)
            .map_err(ApiError::Database)
    }

    pub fn count_all(conn: &mut PgConnection) -> Result<i64, ApiError> {
        meet_sessions::table
            .count()
            .get_result::<i64>(conn)
            .map_err(ApiError::Database)
    }
}
