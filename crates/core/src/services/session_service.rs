use crate::app_state::AppState;
use crate::repositories::demande_repository::DemandeRepository;
use crate::repositories::session_repository::SessionRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::audit_service::AuditService;
use chrono::Utc;
use diesel::prelude::*;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::dtos::session_dto::{
    CallTokenResponse, PaymentIntentResponse, ReportScamRequest, ReportScamResponse, SessionDto,
};
use entraide_primitives::models::entities::enum_types::{DemandeStatus, MeetSessionStatus};
use entraide_primitives::models::entities::meet_session::MeetSession;
use std::collections::HashMap;
use tracing::{error, info, warn};
use uuid::Uuid;

pub struct SessionService;

impl SessionService {
    pub async fn get(
        state: &AppState,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<SessionDto, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("session.get: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let session = Self::load_for_participant(&mut conn, user_id, session_id)?;

        let names = Self::display_names(&mut conn, &[session])?;
        names
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Internal("Session lookup failed".into()))
    }

    pub async fn active_sessions(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<Vec<SessionDto>, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("session.active: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let sessions = SessionRepository::list_active_for_user(&mut conn, user_id)?;
        Self::display_names(&mut conn, &sessions)
    }

    /// Join token for the session's call room.
    pub async fn call_token(
        state: &AppState,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<CallTokenResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("session.call_token: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let session = Self::load_for_participant(&mut conn, user_id, session_id)?;

        if session.status != MeetSessionStatus::Active {
            return Err(ApiError::Conflict("Session is not active".into()));
        }

        let (token, expires_at) = state.video.issue_call_token(user_id, &session.call_id)?;

        Ok(CallTokenResponse {
            token,
            call_id: session.call_id,
            expires_at,
        })
    }

    /// Demo-mode payment intent for the payer. Nothing is persisted
    /// besides the audit trail.
    pub async fn payment_intent(
        state: &AppState,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<PaymentIntentResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("session.payment_intent: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let session = Self::load_for_participant(&mut conn, user_id, session_id)?;

        if session.demandeur_id != user_id {
            return Err(ApiError::Forbidden(
                "Only the demandeur can create a payment intent".into(),
            ));
        }

        let intent = state.payments.create_payment_intent(session.price_cents);

        let _ = AuditService::log_event(
            state,
            Some(user_id),
            "session.payment_intent",
            Some("meet_session"),
            Some(&session_id.to_string()),
            serde_json::json!({ "payment_intent_id": intent.payment_intent_id }),
        )
        .await;

        Ok(intent)
    }

    pub async fn end_session(
        state: &AppState,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<SessionDto, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("session.end: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let session = conn.transaction::<_, ApiError, _>(|conn| {
            let session = SessionRepository::find_by_id_with_lock(conn, session_id)?;

            if !session.is_participant(user_id) {
                return Err(ApiError::Forbidden(
                    "Only a participant can end the session".into(),
                ));
            }
            if !session.status.can_transition_to(MeetSessionStatus::Completed) {
                return Err(ApiError::Conflict(format!(
                    "Session is already {}",
                    session.status
                )));
            }

            SessionRepository::close(conn, session_id, MeetSessionStatus::Completed)?;

            let demande = DemandeRepository::find_by_id_with_lock(conn, session.demande_id)?;
            if demande.status.can_transition_to(DemandeStatus::Completed) {
                DemandeRepository::update_status(conn, demande.id, DemandeStatus::Completed)?;
            }

            SessionRepository::find_by_id(conn, session_id)?
                .ok_or_else(|| ApiError::NotFound("Session not found".into()))
        })?;

        info!(session_id = %session_id, "Session ended");

        let mut dtos = Self::display_names(&mut conn, &[session])?;
        dtos.pop()
            .ok_or_else(|| ApiError::Internal("Session lookup failed".into()))
    }

    /// Cancels the session inside the report window. No money has moved
    /// yet at this point, so cancelling is the whole remedy.
    pub async fn report_scam(
        state: &AppState,
        user_id: Uuid,
        session_id: Uuid,
        payload: ReportScamRequest,
    ) -> Result<ReportScamResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("session.report_scam: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        conn.transaction::<_, ApiError, _>(|conn| {
            let session = SessionRepository::find_by_id_with_lock(conn, session_id)?;

            if !session.is_participant(user_id) {
                return Err(ApiError::Forbidden(
                    "Only a participant can report this session".into(),
                ));
            }
            if session.status != MeetSessionStatus::Active {
                return Err(ApiError::Conflict(format!(
                    "Session is already {}",
                    session.status
                )));
            }
            if Utc::now() >= session.scam_report_deadline() {
                warn!(session_id = %session_id, "Scam report after window");
                return Err(ApiError::Validation(
                    "The scam report window has closed".into(),
                ));
            }

            SessionRepository::close(conn, session_id, MeetSessionStatus::Cancelled)?;
            DemandeRepository::update_status(conn, session.demande_id, DemandeStatus::Cancelled)?;

            Ok(())
        })?;

        let _ = AuditService::log_event(
            state,
            Some(user_id),
            "session.scam_reported",
            Some("meet_session"),
            Some(&session_id.to_string()),
            serde_json::json!({ "reason": payload.reason }),
        )
        .await;

        info!(session_id = %session_id, "Session cancelled after scam report");

        Ok(ReportScamResponse {
            success: true,
            message: "Session cancelled, no payment will be taken".into(),
        })
    }

    fn load_for_participant(
        conn: &mut PgConnection,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<MeetSession, ApiError> {
        let session = SessionRepository::find_by_id(conn, session_id)?
            .ok_or_else(|| ApiError::NotFound("Session not found".into()))?;

        if !session.is_participant(user_id) {
            return Err(ApiError::Forbidden(
                "You are not a participant of this session".into(),
            ));
        }

        Ok(session)
    }

    fn display_names(
        conn: &mut PgConnection,
        sessions: &[MeetSession],
    ) -> Result<Vec<SessionDto>, ApiError> {
        let mut ids: Vec<Uuid> = sessions
            .iter()
            .flat_map(|s| [s.demandeur_id, s.offreur_id])
            .collect();
        ids.sort();
        ids.dedup();

        let names: HashMap<Uuid, String> = UserRepository::display_names(conn, &ids)?
            .into_iter()
            .collect();

        Ok(sessions
            .iter()
            .cloned()
            .map(|session| {
                let demandeur_name = names.get(&session.demandeur_id).cloned();
                let offreur_name = names.get(&session.offreur_id).cloned();
                SessionDto::from_session(session, demandeur_name, offreur_name)
            })
            .collect())
    }
}
