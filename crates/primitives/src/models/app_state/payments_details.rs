use eyre::Report;
use secrecy::SecretString;
use std::env;

/// Payment processor settings. Demo mode fabricates intents locally and
/// never calls out, so the keys only need to look plausible.
#[derive(Debug, Clone)]
pub struct PaymentsInfo {
    pub publishable_key: String,
    pub secret_key: SecretString,
    pub currency: String,
}

impl PaymentsInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            publishable_key: env::var("PAYMENTS_PUBLISHABLE_KEY")
                .unwrap_or_else(|_| "pk_demo_entraide".into()),

            secret_key: SecretString::new(
                env::var("PAYMENTS_SECRET_KEY")
                    .unwrap_or_else(|_| "sk_demo_entraide".into())
                    .into(),
            ),

            currency: env::var("PAYMENTS_CURRENCY").unwrap_or_else(|_| "eur".into()),
        })
    }
}
