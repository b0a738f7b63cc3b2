use crate::app_state::AppState;
use crate::repositories::demande_repository::DemandeRepository;
use crate::repositories::offre_repository::OffreRepository;
use crate::repositories::session_repository::SessionRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::audit_service::AuditService;
use chrono::Utc;
use diesel::prelude::*;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::dtos::offre_dto::{
    CreateOffreRequest, MyOffreDto, OffreDto, UpdateOffreStatusRequest, UpdateOffreStatusResponse,
};
use entraide_primitives::models::entities::enum_types::{
    DemandeStatus, MeetSessionStatus, OffreStatus, SessionPaymentStatus,
};
use entraide_primitives::models::entities::meet_session::NewMeetSession;
use entraide_primitives::models::entities::offre::NewOffre;
use tracing::{error, info};
use uuid::Uuid;

pub struct OffreService;

impl OffreService {
    pub async fn create_offre(
        state: &AppState,
        user_id: Uuid,
        demande_id: Uuid,
        payload: CreateOffreRequest,
    ) -> Result<OffreDto, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("offre.create: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let (offre, offreur_name) = conn.transaction::<_, ApiError, _>(|conn| {
            let demande = DemandeRepository::find_by_id_with_lock(conn, demande_id)?;

            if demande.requester_id == user_id {
                return Err(ApiError::Forbidden(
                    "You cannot bid on your own demande".into(),
                ));
            }
            if demande.status != DemandeStatus::Pending {
                return Err(ApiError::Conflict("Demande is not open for offres".into()));
            }

            let offre = OffreRepository::create(
                conn,
                NewOffre {
                    demande_id,
                    offreur_id: user_id,
                    price_cents: payload.price_cents,
                    message: &payload.message,
                    status: OffreStatus::Pending,
                },
            )?;

            let offreur_name = UserRepository::find_by_id(conn, user_id)?
                .map(|u| u.display_name)
                .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

            Ok((offre, offreur_name))
        })?;

        info!(offre_id = %offre.id, demande_id = %demande_id, "Offre placed");

        Ok(OffreDto::from_offre(offre, Some(offreur_name)))
    }

    pub async fn my_offres(state: &AppState, user_id: Uuid) -> Result<Vec<MyOffreDto>, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("offre.mine: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let rows = OffreRepository::list_by_offreur(&mut conn, user_id)?;

        Ok(rows
            .into_iter()
            .map(|(offre, demande_title, demande_status)| MyOffreDto {
                offre: OffreDto::from(offre),
                demande_title,
                demande_status,
            })
            .collect())
    }

    /// Owner decision on a bid. Accepting spawns the meet session and
    /// moves the demande along; everything happens in one transaction
    /// so a crash can never leave an accepted offre without a session.
    pub async fn update_status(
        state: &AppState,
        user_id: Uuid,
        offre_id: Uuid,
        payload: UpdateOffreStatusRequest,
    ) -> Result<UpdateOffreStatusResponse, ApiError> {
        if payload.status == OffreStatus::Pending {
            return Err(ApiError::Validation(
                "An offre can only be accepted or rejected".into(),
            ));
        }

        let mut conn = state.db.get().map_err(|_| {
            error!("offre.decide: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let outcome = conn.transaction::<_, ApiError, _>(|conn| {
            let offre = OffreRepository::find_by_id_with_lock(conn, offre_id)?;
            let demande = DemandeRepository::find_by_id_with_lock(conn, offre.demande_id)?;

            if demande.requester_id != user_id {
                return Err(ApiError::Forbidden(
                    "Only the demande owner can decide on an offre".into(),
                ));
            }
            if !offre.status.can_transition_to(payload.status) {
                return Err(ApiError::Conflict(format!(
                    "Offre is already {}",
                    offre.status
                )));
            }

            if payload.status == OffreStatus::Rejected {
                OffreRepository::update_status(conn, offre_id, OffreStatus::Rejected)?;
                return Ok(UpdateOffreStatusResponse {
                    success: true,
                    status: OffreStatus::Rejected,
                    meet_session_id: None,
                    call_id: None,
                });
            }

            if !demande.status.can_transition_to(DemandeStatus::InProgress) {
                return Err(ApiError::Conflict(format!(
                    "Demande is already {}",
                    demande.status
                )));
            }

            let call_id = Self::build_call_id(offre.id);

            let session = SessionRepository::create_idempotent(
                conn,
                NewMeetSession {
                    offre_id: offre.id,
                    demande_id: demande.id,
                    demandeur_id: demande.requester_id,
                    offreur_id: offre.offreur_id,
                    call_id: &call_id,
                    price_cents: offre.price_cents,
                    expected_duration_minutes: demande.duration_minutes,
                    status: MeetSessionStatus::Active,
                    payment_status: SessionPaymentStatus::Pending,
                    started_at: Utc::now(),
                },
            )?;

            OffreRepository::update_status(conn, offre_id, OffreStatus::Accepted)?;
            OffreRepository::set_meet_session(conn, offre_id, session.id)?;
            DemandeRepository::update_status(conn, demande.id, DemandeStatus::InProgress)?;

            Ok(UpdateOffreStatusResponse {
                success: true,
                status: OffreStatus::Accepted,
                meet_session_id: Some(session.id),
                call_id: Some(session.call_id),
            })
        })?;

        if outcome.status == OffreStatus::Accepted {
            let _ = AuditService::log_event(
                state,
                Some(user_id),
                "offre.accepted",
                Some("offre"),
                Some(&offre_id.to_string()),
                serde_json::json!({ "meet_session_id": outcome.meet_session_id }),
            )
            .await;
        }

        info!(offre_id = %offre_id, status = %outcome.status, "Offre decided");

        Ok(outcome)
    }

    /// Room names look like `entraide-1a2b3c4d-1733412000`, unique per
    /// accepted offre and stable across retries of the same accept.
    fn build_call_id(offre_id: Uuid) -> String {
        let simple = offre_id.simple().to_string();
        format!("entraide-{}-{}", &simple[..8], Utc::now().timestamp())
    }
}
