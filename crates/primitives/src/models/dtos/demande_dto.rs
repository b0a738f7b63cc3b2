use crate::models::dtos::offre_dto::OffreDto;
use crate::models::entities::demande::Demande;
use crate::models::entities::enum_types::DemandeStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDemandeRequest {
    #[schema(example = "Besoin d'aide pour configurer nginx")]
    #[validate(length(min = 3, max = 120))]
    pub title: String,

    #[validate(length(min = 10, max = 5000))]
    pub description: String,

    #[schema(example = "informatique")]
    #[validate(length(min = 2, max = 60))]
    pub category: String,

    #[schema(example = 10000)]
    #[validate(range(min = 1))]
    pub price_cents: i64,

    #[schema(example = 60)]
    #[validate(range(min = 1, max = 480))]
    pub duration_minutes: i32,

    /// Opaque blob-store keys uploaded out of band.
    pub attachments: Option<Vec<String>>,
}

impl CreateDemandeRequest {
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.category = self.category.trim().to_lowercase();
        self
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DemandeDto {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub attachments: Vec<String>,
    pub status: DemandeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Demande> for DemandeDto {
    fn from(demande: Demande) -> Self {
        let attachments = serde_json::from_value(demande.attachments).unwrap_or_default();
        Self {
            id: demande.id,
            requester_id: demande.requester_id,
            title: demande.title,
            description: demande.description,
            category: demande.category,
            price_cents: demande.price_cents,
            duration_minutes: demande.duration_minutes,
            attachments,
            status: demande.status,
            created_at: demande.created_at,
            updated_at: demande.updated_at,
        }
    }
}

/// Marketplace browse card: someone else's demande plus the requester name.
#[derive(Debug, Serialize, ToSchema)]
pub struct BrowseDemandeDto {
    #[serde(flatten)]
    pub demande: DemandeDto,
    #[schema(example = "Alice Martin")]
    pub requester_name: String,
}

/// Own demande enriched with how many offres are waiting on it.
#[derive(Debug, Serialize, ToSchema)]
pub struct MyDemandeDto {
    #[serde(flatten)]
    pub demande: DemandeDto,
    pub pending_offres: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DemandeDetailResponse {
    #[serde(flatten)]
    pub demande: DemandeDto,
    pub requester_name: String,
    /// All offres for the owner; only the caller's own offre otherwise.
    pub offres: Vec<OffreDto>,
}
