use crate::app_state::AppState;
use crate::repositories::demande_repository::DemandeRepository;
use crate::repositories::offre_repository::OffreRepository;
use crate::repositories::payout_repository::PayoutRepository;
use crate::repositories::session_repository::SessionRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::repositories::user_repository::UserRepository;
use entraide_primitives::error::{ApiError, AuthError};
use entraide_primitives::models::dtos::views_dto::{
    ActivityItemDto, ActivityResponse, AdminDashboard, DashboardResponse, NotificationDto,
    NotificationsResponse,
};
use entraide_primitives::models::entities::enum_types::{DemandeStatus, OffreStatus, PayoutStatus};
use tracing::error;
use uuid::Uuid;

const NOTIFICATION_CAP: usize = 20;
const ACTIVITY_CAP: usize = 50;

pub struct DashboardService;

impl DashboardService {
    pub async fn dashboard(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<DashboardResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("views.dashboard: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let user = UserRepository::find_by_id(&mut conn, user_id)?
            .ok_or_else(|| ApiError::Auth(AuthError::InvalidToken("User does not exist".into())))?;

        let open_demandes =
            DemandeRepository::count_by_status(&mut conn, user_id, DemandeStatus::Pending)?;
        let in_progress_demandes =
            DemandeRepository::count_by_status(&mut conn, user_id, DemandeStatus::InProgress)?;
        let pending_offres_sent = OffreRepository::count_pending_sent(&mut conn, user_id)?;
        let pending_offres_received = OffreRepository::count_pending_received(&mut conn, user_id)?;
        let active_sessions = SessionRepository::count_active_for_user(&mut conn, user_id)?;
        let pending_payout_cents = PayoutRepository::sum_undecided_for_user(&mut conn, user_id)?;

        let admin = if user.is_admin() {
            Some(AdminDashboard {
                total_users: UserRepository::count_all(&mut conn)?,
                total_sessions: SessionRepository::count_all(&mut conn)?,
                commission_earned_cents: TransactionRepository::sum_commission_cents(&mut conn)?,
                payout_queue_depth: PayoutRepository::count_pending(&mut conn)?,
            })
        } else {
            None
        };

        Ok(DashboardResponse {
            open_demandes,
            in_progress_demandes,
            pending_offres_sent,
            pending_offres_received,
            active_sessions,
            wallet_balance_cents: user.wallet_balance_cents,
            pending_payout_cents,
            admin,
        })
    }

    /// Bell items recomputed on every request: offres awaiting the
    /// caller's decision, decisions on the caller's own offres, payout
    /// outcomes.
    pub async fn notifications(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<NotificationsResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("views.notifications: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let mut notifications: Vec<NotificationDto> = Vec::new();

        for (offre, demande_title) in OffreRepository::list_pending_received(&mut conn, user_id)? {
            notifications.push(NotificationDto {
                kind: "offre_received".into(),
                message: format!(
                    "New offre of {:.2} EUR on \"{}\"",
                    offre.price_cents as f64 / 100.0,
                    demande_title
                ),
                target_id: Some(offre.demande_id),
                at: offre.created_at,
            });
        }

        for (offre, demande_title) in OffreRepository::list_recent_decided_by_offreur(
            &mut conn,
            user_id,
            NOTIFICATION_CAP as i64,
        )? {
            let (kind, verb) = match offre.status {
                OffreStatus::Accepted => ("offre_accepted", "accepted"),
                _ => ("offre_rejected", "rejected"),
            };
            notifications.push(NotificationDto {
                kind: kind.into(),
                message: format!("Your offre on \"{}\" was {}", demande_title, verb),
                target_id: offre.meet_session_id.or(Some(offre.demande_id)),
                at: offre.updated_at,
            });
        }

        for payout in PayoutRepository::list_by_user(&mut conn, user_id)? {
            let kind = match payout.status {
                PayoutStatus::Completed => "payout_completed",
                PayoutStatus::Rejected => "payout_rejected",
                _ => continue,
            };
            notifications.push(NotificationDto {
                kind: kind.into(),
                message: match &payout.reject_reason {
                    Some(reason) => format!(
                        "Payout of {:.2} EUR rejected: {}",
                        payout.amount_cents as f64 / 100.0,
                        reason
                    ),
                    None => format!(
                        "Payout of {:.2} EUR completed",
                        payout.amount_cents as f64 / 100.0
                    ),
                },
                target_id: Some(payout.id),
                at: payout.processed_at.unwrap_or(payout.updated_at),
            });
        }

        notifications.sort_by(|a, b| b.at.cmp(&a.at));
        notifications.truncate(NOTIFICATION_CAP);

        Ok(NotificationsResponse { notifications })
    }

    /// Chronological feed over everything the caller touched.
    pub async fn activity(state: &AppState, user_id: Uuid) -> Result<ActivityResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("views.activity: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let mut items: Vec<ActivityItemDto> = Vec::new();

        for demande in DemandeRepository::list_by_requester(&mut conn, user_id)? {
            items.push(ActivityItemDto {
                kind: "demande_posted".into(),
                label: format!("Posted \"{}\"", demande.title),
                amount_cents: Some(demande.price_cents),
                at: demande.created_at,
            });
        }

        for (offre, demande_title, _) in OffreRepository::list_by_offreur(&mut conn, user_id)? {
            items.push(ActivityItemDto {
                kind: "offre_placed".into(),
                label: format!("Bid on \"{}\"", demande_title),
                amount_cents: Some(offre.price_cents),
                at: offre.created_at,
            });
        }

        for session in SessionRepository::list_for_user(&mut conn, user_id)? {
            items.push(ActivityItemDto {
                kind: format!("session_{}", session.status),
                label: format!("Session {}", session.call_id),
                amount_cents: Some(session.price_cents),
                at: session.ended_at.unwrap_or(session.started_at),
            });
        }

        for transaction in TransactionRepository::list_for_user(&mut conn, user_id)? {
            let (kind, amount) = if transaction.offreur_id == user_id {
                ("earning", transaction.provider_cents)
            } else {
                ("payment", transaction.total_cents)
            };
            items.push(ActivityItemDto {
                kind: kind.into(),
                label: "Session settled".into(),
                amount_cents: Some(amount),
                at: transaction.created_at,
            });
        }

        items.sort_by(|a, b| b.at.cmp(&a.at));
        items.truncate(ACTIVITY_CAP);

        Ok(ActivityResponse { items })
    }
}
