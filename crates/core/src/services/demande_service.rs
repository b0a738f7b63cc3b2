use crate::app_state::AppState;
use crate::repositories::demande_repository::DemandeRepository;
use crate::repositories::offre_repository::OffreRepository;
use diesel::prelude::*;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::dtos::demande_dto::{
    BrowseDemandeDto, CreateDemandeRequest, DemandeDetailResponse, DemandeDto, MyDemandeDto,
};
use entraide_primitives::models::dtos::offre_dto::OffreDto;
use entraide_primitives::models::entities::demande::NewDemande;
use entraide_primitives::models::entities::enum_types::DemandeStatus;
use std::collections::HashMap;
use tracing::{error, info};
use uuid::Uuid;

pub struct DemandeService;

impl DemandeService {
    pub async fn create(
        state: &AppState,
        user_id: Uuid,
        mut payload: CreateDemandeRequest,
    ) -> Result<DemandeDto, ApiError> {
        payload = payload.normalize();

        let mut conn = state.db.get().map_err(|_| {
            error!("demande.create: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let attachments =
            serde_json::to_value(payload.attachments.as_deref().unwrap_or_default())
                .map_err(|_| ApiError::Validation("Invalid attachment list".into()))?;

        let new_demande = NewDemande {
            requester_id: user_id,
            title: &payload.title,
            description: &payload.description,
            category: &payload.category,
            price_cents: payload.price_cents,
            duration_minutes: payload.duration_minutes,
            attachments,
            status: DemandeStatus::Pending,
        };

        let demande = DemandeRepository::create(&mut conn, new_demande)?;

        info!(demande_id = %demande.id, user_id = %user_id, "Demande posted");

        Ok(DemandeDto::from(demande))
    }

    /// Open demandes from other users, the browse feed.
    pub async fn browse(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<Vec<BrowseDemandeDto>, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("demande.browse: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let rows = DemandeRepository::list_open_excluding(&mut conn, user_id)?;

        Ok(rows
            .into_iter()
            .map(|(demande, requester_name)| BrowseDemandeDto {
                demande: DemandeDto::from(demande),
                requester_name,
            })
            .collect())
    }

    pub async fn my_demandes(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<Vec<MyDemandeDto>, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("demande.mine: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let demandes = DemandeRepository::list_by_requester(&mut conn, user_id)?;
        let ids: Vec<Uuid> = demandes.iter().map(|d| d.id).collect();
        let counts: HashMap<Uuid, i64> = DemandeRepository::pending_offre_counts(&mut conn, &ids)?
            .into_iter()
            .collect();

        Ok(demandes
            .into_iter()
            .map(|demande| {
                let pending_offres = counts.get(&demande.id).copied().unwrap_or(0);
                MyDemandeDto {
                    demande: DemandeDto::from(demande),
                    pending_offres,
                }
            })
            .collect())
    }

    /// Owners see every offre on their demande; other callers only
    /// their own bid.
    pub async fn detail(
        state: &AppState,
        user_id: Uuid,
        demande_id: Uuid,
    ) -> Result<DemandeDetailResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("demande.detail: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let (demande, requester_name) = DemandeRepository::find_detail(&mut conn, demande_id)?
            .ok_or_else(|| ApiError::NotFound("Demande not found".into()))?;

        let offres = if demande.requester_id == user_id {
            OffreRepository::list_by_demande(&mut conn, demande_id)?
        } else {
            OffreRepository::list_by_demande_for_offreur(&mut conn, demande_id, user_id)?
        };

        Ok(DemandeDetailResponse {
            demande: DemandeDto::from(demande),
            requester_name,
            offres: offres
                .into_iter()
                .map(|(offre, offreur_name)| OffreDto::from_offre(offre, Some(offreur_name)))
                .collect(),
        })
    }

    /// Owner cancellation, only while no offre has been accepted.
    pub async fn cancel(
        state: &AppState,
        user_id: Uuid,
        demande_id: Uuid,
    ) -> Result<DemandeDto, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("demande.cancel: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let demande = conn.transaction::<_, ApiError, _>(|conn| {
            let demande = DemandeRepository::find_by_id_with_lock(conn, demande_id)?;

            if demande.requester_id != user_id {
                return Err(ApiError::Forbidden(
                    "Only the requester can cancel a demande".into(),
                ));
            }
            if demande.status != DemandeStatus::Pending {
                return Err(ApiError::Conflict(format!(
                    "Cannot cancel a demande in status {}",
                    demande.status
                )));
            }

            DemandeRepository::update_status(conn, demande_id, DemandeStatus::Cancelled)?;

            DemandeRepository::find_by_id(conn, demande_id)?
                .ok_or_else(|| ApiError::NotFound("Demande not found".into()))
        })?;

        info!(demande_id = %demande_id, "Demande cancelled");

        Ok(DemandeDto::from(demande))
    }
}
