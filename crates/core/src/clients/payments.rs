use entraide_primitives::models::app_state::payments_details::PaymentsInfo;
use entraide_primitives::models::dtos::session_dto::PaymentIntentResponse;
use rand::distributions::Alphanumeric;
use rand::Rng;
use uuid::Uuid;

/// Demo-mode payment processor. Intents are fabricated locally so the
/// frontend flow can be exercised without a live provider account.
#[derive(Clone)]
pub struct PaymentsClient {
    currency: String,
}

impl PaymentsClient {
    pub fn new(config: &PaymentsInfo) -> Self {
        Self {
            currency: config.currency.clone(),
        }
    }

    pub fn create_payment_intent(&self, amount_cents: i64) -> PaymentIntentResponse {
        let id_part: String = Uuid::new_v4().simple().to_string()[..12].to_string();
        let secret_part: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();

        let payment_intent_id = format!("pi_demo_{}", id_part);
        let client_secret = format!("{}_secret_{}", payment_intent_id, secret_part);

        PaymentIntentResponse {
            payment_intent_id,
            client_secret,
            amount_cents,
            currency: self.currency.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PaymentsClient {
        PaymentsClient::new(&PaymentsInfo::new().unwrap())
    }

    #[test]
    fn intent_carries_amount_and_currency() {
        let intent = client().create_payment_intent(12_500);

        assert_eq!(intent.amount_cents, 12_500);
        assert_eq!(intent.currency, "eur");
        assert!(intent.payment_intent_id.starts_with("pi_demo_"));
        assert!(intent.client_secret.starts_with(&intent.payment_intent_id));
    }

    #[test]
    fn intents_are_unique() {
        let client = client();
        let a = client.create_payment_intent(100);
        let b = client.create_payment_intent(100);

        assert_ne!(a.payment_intent_id, b.payment_intent_id);
        assert_ne!(a.client_secret, b.client_secret);
    }
}
