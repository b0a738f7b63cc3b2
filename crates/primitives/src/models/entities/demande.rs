use crate::models::entities::enum_types::DemandeStatus;
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::demandes)]
#[diesel(belongs_to(crate::models::entities::user::User, foreign_key = requester_id))]
pub struct Demande {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub attachments: Value,
    pub status: DemandeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::demandes)]
pub struct NewDemande<'a> {
    pub requester_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub attachments: Value,
    pub status: DemandeStatus,
}
