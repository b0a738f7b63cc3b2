use crate::models::entities::enum_types::OffreStatus;
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::offres)]
#[diesel(belongs_to(crate::models::entities::demande::Demande))]
pub struct Offre {
    pub id: Uuid,
    pub demande_id: Uuid,
    pub offreur_id: Uuid,
    pub price_cents: i64,
    pub message: String,
    pub status: OffreStatus,
    pub meet_session_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::offres)]
pub struct NewOffre<'a> {
    pub demande_id: Uuid,
    pub offreur_id: Uuid,
    pub price_cents: i64,
    pub message: &'a str,
    pub status: OffreStatus,
}
