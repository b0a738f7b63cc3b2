use diesel::dsl::count_star;
use diesel::prelude::*;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::entities::demande::{Demande, NewDemande};
use entraide_primitives::models::entities::enum_types::{DemandeStatus, OffreStatus};
use entraide_primitives::schema::{demandes, offres, users};
use uuid::Uuid;

pub struct DemandeRepository;

impl DemandeRepository {
    pub fn create(conn: &mut PgConnection, new_demande: NewDemande) -> Result<Demande, ApiError> {
        diesel::insert_into(demandes::table)
            .values(&new_demande)
            .get_result::<Demande>(conn)
            .map_err(ApiError::Database)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        demande_id: Uuid,
    ) -> Result<Option<Demande>, ApiError> {
        demandes::table
            .find(demande_id)
            .first::<Demande>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    /// Row-locked read for status transitions. The caller must hold a
    /// transaction.
    pub fn find_by_id_with_lock(
        conn: &mut PgConnection,
        demande_id: Uuid,
    ) -> Result<Demande, ApiError> {
        demandes::table
            .find(demande_id)
            .for_update()
            .first::<Demande>(conn)
            .map_err(|e| {
                if matches!(e, diesel::result::Error::NotFound) {
                    ApiError::NotFound("Demande not found".into())
                } else {
                    ApiError::Database(e)
                }
            })
    }

    /// Demande plus the requester's display name.
    pub fn find_detail(
        conn: &mut PgConnection,
        demande_id: Uuid,
    ) -> Result<Option<(Demande, String)>, ApiError> {
        demandes::table
            .inner_join(users::table)
            .filter(demandes::id.eq(demande_id))
            .select((Demande::as_select(), users::display_name))
            .first::<(Demande, String)>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    /// The browse feed: open demandes posted by other users, newest first.
    pub fn list_open_excluding(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Vec<(Demande, String)>, ApiError> {
        demandes::table
            .inner_join(users::table)
            .filter(demandes::status.eq(DemandeStatus::Pending))
            .filter(demandes::requester_id.ne(user_id))
            .order(demandes::created_at.desc())
            .select((Demande::as_select(), users::display_name))
            .load::<(Demande, String)>(conn)
            .map_err(ApiError::Database)
    }

    pub fn list_by_requester(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Vec<Demande>, ApiError> {
        demandes::table
            .filter(demandes::requester_id.eq(user_id))
            .order(demandes::created_at.desc())
            .load::<Demande>(conn)
            .map_err(ApiError::Database)
    }

    /// Pending-offre counts per demande. Demandes with no pending offres
    /// are absent from the result.
    pub fn pending_offre_counts(
        conn: &mut PgConnection,
        demande_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, i64)>, ApiError> {
        offres::table
            .filter(offres::demande_id.eq_any(demande_ids))
            .filter(offres::status.eq(OffreStatus::Pending))
            .group_by(offres::demande_id)
            .select((offres::demande_id, count_star()))
            .load::<(Uuid, i64)>(conn)
            .map_err(ApiError::Database)
    }

    pub fn update_status(
        conn: &mut PgConnection,
        demande_id: Uuid,
        status: DemandeStatus,
    ) -> Result<(), ApiError> {
        diesel::update(demandes::table.find(demande_id))
            .set((
                demandes::status.eq(status),
                demandes::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)
            .map_err(ApiError::Database)?;
        Ok(())
    }

    pub fn count_by_status(
        conn: &mut PgConnection,
        user_id: Uuid,
        status: DemandeStatus,
    ) -> Result<i64, ApiError> {
        demandes::table
            .filter(demandes::requester_id.eq(user_id))
            .filter(demandes::status.eq(status))
            .count()
            .get_result::<i64>(conn)
            .map_err(ApiError::Database)
    }
}
