use crate::models::entities::enum_types::{MeetSessionStatus, SessionPaymentStatus};
use chrono::{DateTime, Duration, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::meet_sessions)]
#[diesel(belongs_to(crate::models::entities::demande::Demande))]
pub struct MeetSession {
    pub id: Uuid,
    pub offre_id: Uuid,
    pub demande_id: Uuid,
    pub demandeur_id: Uuid,
    pub offreur_id: Uuid,
    pub call_id: String,
    pub price_cents: i64,
    pub expected_duration_minutes: i32,
    pub status: MeetSessionStatus,
    pub payment_status: SessionPaymentStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MeetSession {
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.demandeur_id == user_id || self.offreur_id == user_id
    }

    /// Scam reports close once a quarter of the expected duration has elapsed.
    pub fn scam_report_deadline(&self) -> DateTime<Utc> {
        let window_seconds = i64::from(self.expected_duration_minutes) * 60 / 4;
        self.started_at + Duration::seconds(window_seconds)
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::meet_sessions)]
pub struct NewMeetSession<'a> {
    pub offre_id: Uuid,
    pub demande_id: Uuid,
    pub demandeur_id: Uuid,
    pub offreur_id: Uuid,
    pub call_id: &'a str,
    pub price_cents: i64,
    pub expected_duration_minutes: i32,
    pub status: MeetSessionStatus,
    pub payment_status: SessionPaymentStatus,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expected_minutes: i32, started_at: DateTime<Utc>) -> MeetSession {
        MeetSession {
            id: Uuid::new_v4(),
            offre_id: Uuid::new_v4(),
            demande_id: Uuid::new_v4(),
            demandeur_id: Uuid::new_v4(),
            offreur_id: Uuid::new_v4(),
            call_id: "entraide-test".into(),
            price_cents: 10_000,
            expected_duration_minutes: expected_minutes,
            status: MeetSessionStatus::Active,
            payment_status: SessionPaymentStatus::Pending,
            started_at,
            ended_at: None,
            created_at: started_at,
            updated_at: started_at,
        }
    }

    #[test]
    fn scam_window_is_a_quarter_of_expected_duration() {
        let start = Utc::now();
        let s = session(60, start);
        assert_eq!(s.scam_report_deadline(), start + Duration::minutes(15));

        let s = session(30, start);
        assert_eq!(s.scam_report_deadline(), start + Duration::seconds(450));
    }

    #[test]
    fn participant_check_covers_both_sides() {
        let s = session(60, Utc::now());
        assert!(s.is_participant(s.demandeur_id));
        assert!(s.is_participant(s.offreur_id));
        assert!(!s.is_participant(Uuid::new_v4()));
    }
}
