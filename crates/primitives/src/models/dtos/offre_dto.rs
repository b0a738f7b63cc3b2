use crate::models::entities::enum_types::OffreStatus;
use crate::models::entities::offre::Offre;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOffreRequest {
    #[schema(example = 9000)]
    #[validate(range(min = 1))]
    pub price_cents: i64,

    #[schema(example = "Je peux vous aider ce soir, j'ai deja fait cette installation.")]
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OffreDto {
    pub id: Uuid,
    pub demande_id: Uuid,
    pub offreur_id: Uuid,
    #[schema(example = "Bruno Keita")]
    pub offreur_name: Option<String>,
    pub price_cents: i64,
    pub message: String,
    pub status: OffreStatus,
    pub meet_session_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl OffreDto {
    pub fn from_offre(offre: Offre, offreur_name: Option<String>) -> Self {
        Self {
            id: offre.id,
            demande_id: offre.demande_id,
            offreur_id: offre.offreur_id,
            offreur_name,
            price_cents: offre.price_cents,
            message: offre.message,
            status: offre.status,
            meet_session_id: offre.meet_session_id,
            created_at: offre.created_at,
        }
    }
}

impl From<Offre> for OffreDto {
    fn from(offre: Offre) -> Self {
        OffreDto::from_offre(offre, None)
    }
}

/// Own bid plus the demande it targets.
#[derive(Debug, Serialize, ToSchema)]
pub struct MyOffreDto {
    #[serde(flatten)]
    pub offre: OffreDto,
    pub demande_title: String,
    pub demande_status: crate::models::entities::enum_types::DemandeStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOffreStatusRequest {
    /// Only `accepted` and `rejected` are decisions an owner can make.
    pub status: OffreStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateOffreStatusResponse {
    pub success: bool,
    pub status: OffreStatus,
    pub meet_session_id: Option<Uuid>,
    #[schema(example = "entraide-1a2b3c4d-1733412000")]
    pub call_id: Option<String>,
}
