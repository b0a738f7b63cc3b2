use crate::app_state::AppState;
use crate::fees::MIN_PAYOUT_CENTS;
use crate::repositories::payout_repository::PayoutRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::audit_service::AuditService;
use diesel::prelude::*;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::dtos::payout_dto::{
    AdminPayoutDto, CreatePayoutRequest, PayoutRequestDto, ProcessPayoutRequest,
    ProcessPayoutResponse,
};
use entraide_primitives::models::entities::enum_types::PayoutStatus;
use entraide_primitives::models::entities::payout_request::NewPayoutRequest;
use tracing::{error, info};
use uuid::Uuid;

pub struct PayoutService;

impl PayoutService {
    /// Debits the wallet and freezes the request in one transaction.
    /// The bank details are snapshotted so a later profile edit cannot
    /// redirect an in-flight payout.
    pub async fn request_payout(
        state: &AppState,
        user_id: Uuid,
        payload: CreatePayoutRequest,
    ) -> Result<PayoutRequestDto, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("payout.request: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let payout = conn.transaction::<_, ApiError, _>(|conn| {
            let user = UserRepository::find_by_id_with_lock(conn, user_id)?;

            let bank_account = user.bank_account.clone().ok_or_else(|| {
                ApiError::Validation("Add your bank details before requesting a payout".into())
            })?;

            if payload.amount_cents < MIN_PAYOUT_CENTS {
                return Err(ApiError::Validation(format!(
                    "Minimum payout is {} cents",
                    MIN_PAYOUT_CENTS
                )));
            }
            if payload.amount_cents > user.wallet_balance_cents {
                return Err(ApiError::InsufficientFunds {
                    available_cents: user.wallet_balance_cents,
                    requested_cents: payload.amount_cents,
                });
            }

            UserRepository::debit_wallet(conn, user_id, payload.amount_cents)?;

            PayoutRepository::create(
                conn,
                NewPayoutRequest {
                    user_id,
                    amount_cents: payload.amount_cents,
                    status: PayoutStatus::Pending,
                    bank_account,
                },
            )
        })?;

        let _ = AuditService::log_event(
            state,
            Some(user_id),
            "payout.requested",
            Some("payout_request"),
            Some(&payout.id.to_string()),
            serde_json::json!({ "amount_cents": payout.amount_cents }),
        )
        .await;

        info!(
            payout_id = %payout.id,
            amount_cents = payout.amount_cents,
            "Payout requested"
        );

        Ok(PayoutRequestDto::from(payout))
    }

    pub async fn my_payouts(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<Vec<PayoutRequestDto>, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("payout.mine: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let payouts = PayoutRepository::list_by_user(&mut conn, user_id)?;
        Ok(payouts.into_iter().map(PayoutRequestDto::from).collect())
    }

    pub async fn admin_queue(
        state: &AppState,
        status: Option<PayoutStatus>,
    ) -> Result<Vec<AdminPayoutDto>, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("payout.queue: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let rows = PayoutRepository::list_with_requester(&mut conn, status)?;

        Ok(rows
            .into_iter()
            .map(|(payout, requester_email, requester_name)| AdminPayoutDto {
                payout: PayoutRequestDto::from(payout),
                requester_email,
                requester_name,
            })
            .collect())
    }

    /// Admin decision. Completing marks the requester's settled
    /// transactions paid out; rejecting returns the money. The row lock
    /// keeps two admins from deciding the same request twice.
    pub async fn process(
        state: &AppState,
        admin_id: Uuid,
        payout_id: Uuid,
        payload: ProcessPayoutRequest,
    ) -> Result<ProcessPayoutResponse, ApiError> {
        if !matches!(
            payload.status,
            PayoutStatus::Completed | PayoutStatus::Rejected
        ) {
            return Err(ApiError::Validation(
                "A payout can only be completed or rejected".into(),
            ));
        }
        if payload.status == PayoutStatus::Rejected && payload.reject_reason.is_none() {
            return Err(ApiError::Validation(
                "A rejection needs a reject_reason".into(),
            ));
        }

        let mut conn = state.db.get().map_err(|_| {
            error!("payout.process: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let payout = conn.transaction::<_, ApiError, _>(|conn| {
            let payout = PayoutRepository::find_by_id_with_lock(conn, payout_id)?;

            if payout.status.is_final() {
                return Err(ApiError::Conflict(format!(
                    "Payout request is already {}",
                    payout.status
                )));
            }

            if payload.status == PayoutStatus::Completed {
                TransactionRepository::mark_payouts_completed_for_user(conn, payout.user_id)?;
            } else {
                UserRepository::credit_wallet(conn, payout.user_id, payout.amount_cents)?;
            }

            PayoutRepository::decide(
                conn,
                payout_id,
                payload.status,
                admin_id,
                payload.reject_reason.as_deref(),
            )
        })?;

        let _ = AuditService::log_event(
            state,
            Some(admin_id),
            "payout.processed",
            Some("payout_request"),
            Some(&payout_id.to_string()),
            serde_json::json!({
                "status": payout.status,
                "amount_cents": payout.amount_cents,
            }),
        )
        .await;

        info!(
            payout_id = %payout_id,
            status = %payout.status,
            "Payout processed"
        );

        Ok(ProcessPayoutResponse {
            success: true,
            payout: PayoutRequestDto::from(payout),
        })
    }
}
