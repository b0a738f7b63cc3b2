use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Derived read models. None of these are stored; every request recomputes
// them from the base tables.

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub open_demandes: i64,
    pub in_progress_demandes: i64,
    pub pending_offres_sent: i64,
    pub pending_offres_received: i64,
    pub active_sessions: i64,
    pub wallet_balance_cents: i64,
    pub pending_payout_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminDashboard>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDashboard {
    pub total_users: i64,
    pub total_sessions: i64,
    pub commission_earned_cents: i64,
    pub payout_queue_depth: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationDto {
    #[schema(example = "offre_received")]
    pub kind: String,
    pub message: String,
    pub target_id: Option<Uuid>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityItemDto {
    #[schema(example = "session_settled")]
    pub kind: String,
    pub label: String,
    pub amount_cents: Option<i64>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityResponse {
    pub items: Vec<ActivityItemDto>,
}
