use axum::extract::{Extension, Json, Path, State};
use entraide_core::services::session_service::SessionService;
use entraide_core::{AppState, Claims};
use entraide_primitives::error::{ApiError, ApiErrorResponse};
use entraide_primitives::models::dtos::session_dto::PaymentIntentResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/sessions/{session_id}/payment-intent",
    tag = "Sessions",
    description = "Create a demo payment intent for the session price. Only the demandeur can \
                   call this; the intent is returned to the client and nothing is charged.",
    params(("session_id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Payment intent created", body = PaymentIntentResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Caller is not the demandeur", body = ApiErrorResponse),
        (status = 404, description = "Session not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn payment_intent(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<PaymentIntentResponse>, ApiError> {
    let user_id = claims.user_id()?;

    let res = SessionService::payment_intent(&state, user_id, session_id).await?;

    Ok(Json(res))
}
