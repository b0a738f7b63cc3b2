use crate::app_state::AppState;
use crate::fees::CommissionSplit;
use crate::repositories::session_repository::SessionRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::audit_service::AuditService;
use crate::services::settings_service::SettingsService;
use diesel::prelude::*;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::dtos::transaction_dto::SettleResponse;
use entraide_primitives::models::entities::enum_types::{
    MeetSessionStatus, SessionPaymentStatus, TransactionPayoutStatus,
};
use entraide_primitives::models::entities::transaction::NewTransaction;
use tracing::{error, info};
use uuid::Uuid;

pub struct SettlementService;

impl SettlementService {
    /// Splits a completed session's price into platform commission and
    /// provider credit. Safe to call any number of times: the unique
    /// transaction per session means only the first call moves money.
    pub async fn settle(
        state: &AppState,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<SettleResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("session.settle: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let (response, inserted) = conn.transaction::<_, ApiError, _>(|conn| {
            let session = SessionRepository::find_by_id_with_lock(conn, session_id)?;

            if !session.is_participant(user_id) {
                return Err(ApiError::Forbidden(
                    "Only a participant can settle the session".into(),
                ));
            }
            match session.status {
                MeetSessionStatus::Completed => {}
                MeetSessionStatus::Active => {
                    return Err(ApiError::Conflict("Session has not ended".into()))
                }
                MeetSessionStatus::Cancelled => {
                    return Err(ApiError::Conflict(
                        "A cancelled session cannot be settled".into(),
                    ))
                }
            }

            let rate = SettingsService::commission_rate(conn)?;
            let split = CommissionSplit::compute(session.price_cents, rate)?;

            let (transaction, inserted) = TransactionRepository::create(
                conn,
                NewTransaction {
                    session_id: session.id,
                    offre_id: session.offre_id,
                    demandeur_id: session.demandeur_id,
                    offreur_id: session.offreur_id,
                    total_cents: split.total_cents,
                    commission_rate: split.rate_percent,
                    commission_cents: split.commission_cents,
                    provider_cents: split.provider_cents,
                    processor_fee_cents: split.processor_fee_cents,
                    payout_status: TransactionPayoutStatus::Pending,
                },
            )?;

            if inserted {
                UserRepository::credit_wallet(
                    conn,
                    session.offreur_id,
                    transaction.provider_cents,
                )?;
                SessionRepository::set_payment_status(
                    conn,
                    session.id,
                    SessionPaymentStatus::Completed,
                )?;
            }

            let response = SettleResponse {
                transaction_id: transaction.id,
                session_id: session.id,
                total_cents: transaction.total_cents,
                commission_rate: transaction.commission_rate,
                commission_cents: transaction.commission_cents,
                provider_cents: transaction.provider_cents,
                processor_fee_cents: transaction.processor_fee_cents,
                already_exists: !inserted,
            };

            Ok((response, inserted))
        })?;

        if inserted {
            let _ = AuditService::log_event(
                state,
                Some(user_id),
                "session.settled",
                Some("meet_session"),
                Some(&session_id.to_string()),
                serde_json::json!({
                    "transaction_id": response.transaction_id,
                    "total_cents": response.total_cents,
                    "commission_cents": response.commission_cents,
                    "provider_cents": response.provider_cents,
                }),
            )
            .await;

            info!(
                session_id = %session_id,
                transaction_id = %response.transaction_id,
                "Session settled"
            );
        }

        Ok(response)
    }
}
