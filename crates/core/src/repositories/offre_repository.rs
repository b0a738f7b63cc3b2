use diesel::prelude::*;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::entities::enum_types::{DemandeStatus, OffreStatus};
use entraide_primitives::models::entities::offre::{NewOffre, Offre};
use entraide_primitives::schema::{demandes, offres, users};
use uuid::Uuid;

pub struct OffreRepository;

impl OffreRepository {
    /// Insert relies on the partial unique index over live offres, so a
    /// second pending offre from the same bidder fails here rather than
    /// in application code.
    pub fn create(conn: &mut PgConnection, new_offre: NewOffre) -> Result<Offre, ApiError> {
        diesel::insert_into(offres::table)
            .values(&new_offre)
            .get_result::<Offre>(conn)
            .map_err(|e| {
                if matches!(
                    e,
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        _
                    )
                ) {
                    ApiError::Conflict("You already have a live offre on this demande".into())
                } else {
                    ApiError::Database(e)
                }
            })
    }

    pub fn find_by_id(conn: &mut PgConnection, offre_id: Uuid) -> Result<Option<Offre>, ApiError> {
        offres::table
            .find(offre_id)
            .first::<Offre>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    pub fn find_by_id_with_lock(conn: &mut PgConnection, offre_id: Uuid) -> Result<Offre, ApiError> {
        offres::table
            .find(offre_id)
            .for_update()
            .first::<Offre>(conn)
            .map_err(|e| {
                if matches!(e, diesel::result::Error::NotFound) {
                    ApiError::NotFound("Offre not found".into())
                } else {
                    ApiError::Database(e)
                }
            })
    }

    /// All offres on a demande with each bidder's display name, oldest
    /// first.
    pub fn list_by_demande(
        conn: &mut PgConnection,
        demande_id: Uuid,
    ) -> Result<Vec<(Offre, String)>, ApiError> {
        offres::table
            .inner_join(users::table)
            .filter(offres::demande_id.eq(demande_id))
            .order(offres::created_at.asc())
            .select((Offre::as_select(), users::display_name))
            .load::<(Offre, String)>(conn)
            .map_err(ApiError::Database)
    }

    pub fn list_by_demande_for_offreur(
        conn: &mut PgConnection,
        demande_id: Uuid,
        offreur_id: Uuid,
    ) -> Result<Vec<(Offre, String)>, ApiError> {
        offres::table
            .inner_join(users::table)
            .filter(offres::demande_id.eq(demande_id))
            .filter(offres::offreur_id.eq(offreur_id))
            .order(offres::created_at.asc())
            .select((Offre::as_select(), users::display_name))
            .load::<(Offre, String)>(conn)
            .map_err(ApiError::Database)
    }

    /// Every offre the user has placed, with the parent demande's title
    /// and current status, newest first.
    pub fn list_by_offreur(
        conn: &mut PgConnection,
        offreur_id: Uuid,
    ) -> Result<Vec<(Offre, String, DemandeStatus)>, ApiError> {
        offres::table
            .inner_join(demandes::table)
            .filter(offres::offreur_id.eq(offreur_id))
            .order(offres::created_at.desc())
            .select((Offre::as_select(), demandes::title, demandes::status))
            .load::<(Offre, String, DemandeStatus)>(conn)
            .map_err(ApiError::Database)
    }

    pub fn update_status(
        conn: &mut PgConnection,
        offre_id: Uuid,
        status: OffreStatus,
    ) -> Result<(), ApiError> {
        diesel::update(offres::table.find(offre_id))
            .set((
                offres::status.eq(status),
                offres::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)
            .map_err(ApiError::Database)?;
        Ok(())
    }

    pub fn set_meet_session(
        conn: &mut PgConnection,
        offre_id: Uuid,
        session_id: Uuid,
    ) -> Result<(), ApiError> {
        diesel::update(offres::table.find(offre_id))
            .set((
                offres::meet_session_id.eq(Some(session_id)),
                offres::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)
            .map_err(ApiError::Database)?;
        Ok(())
    }

    /// Pending offres on the user's own demandes, with the demande
    /// title, newest first. Feeds the notification bell.
    pub fn list_pending_received(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Vec<(Offre, String)>, ApiError> {
        offres::table
            .inner_join(demandes::table)
            .filter(demandes::requester_id.eq(user_id))
            .filter(offres::status.eq(OffreStatus::Pending))
            .order(offres::created_at.desc())
            .select((Offre::as_select(), demandes::title))
            .load::<(Offre, String)>(conn)
            .map_err(ApiError::Database)
    }

    /// The user's own offres that were accepted or rejected, most
    /// recent decision first.
    pub fn list_recent_decided_by_offreur(
        conn: &mut PgConnection,
        offreur_id: Uuid,
        limit: i64,
    ) -> Result<Vec<(Offre, String)>, ApiError> {
        offres::table
            .inner_join(demandes::table)
            .filter(offres::offreur_id.eq(offreur_id))
            .filter(offres::status.eq_any([OffreStatus::Accepted, OffreStatus::Rejected]))
            .order(offres::updated_at.desc())
            .limit(limit)
            .select((Offre::as_select(), demandes::title))
            .load::<(Offre, String)>(conn)
            .map_err(ApiError::Database)
    }

    pub fn count_pending_sent(conn: &mut PgConnection, user_id: Uuid) -> Result<i64, ApiError> {
        offres::table
            .filter(offres::offreur_id.eq(user_id))
            .filter(offres::status.eq(OffreStatus::Pending))
            .count()
            .get_result::<i64>(conn)
            .map_err(ApiError::Database)
    }

    pub fn count_pending_received(conn: &mut PgConnection, user_id: Uuid) -> Result<i64, ApiError> {
        offres::table
            .inner_join(demandes::table)
            .filter(demandes::requester_id.eq(user_id))
            .filter(offres::status.eq(OffreStatus::Pending))
            .count()
            .get_result::<i64>(conn)
            .map_err(ApiError::Database)
    }
}
