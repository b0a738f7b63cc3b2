use entraide_primitives::error::ApiError;

/// Platform cut applied when no `commission_rate` setting is stored.
pub const DEFAULT_COMMISSION_RATE: i32 = 10;

/// Smallest payout a provider can request, in cents.
pub const MIN_PAYOUT_CENTS: i64 = 1000;

/// How a settled session total divides between the platform and the provider.
///
/// All arithmetic is integer cents. The commission rounds half up and the
/// provider share is the exact remainder, so the two always re-add to the
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionSplit {
    pub total_cents: i64,
    pub rate_percent: i32,
    pub commission_cents: i64,
    pub provider_cents: i64,
    pub processor_fee_cents: i64,
}

impl CommissionSplit {
    pub fn compute(total_cents: i64, rate_percent: i32) -> Result<Self, ApiError> {
        if total_cents < 0 {
            return Err(ApiError::Validation(format!(
                "Amount must not be negative, got {}",
                total_cents
            )));
        }
        if !(0..=100).contains(&rate_percent) {
            return Err(ApiError::Validation(format!(
                "Commission rate must be between 0 and 100, got {}",
                rate_percent
            )));
        }

        let commission_cents =
            ((total_cents as i128 * rate_percent as i128 + 50) / 100) as i64;
        let provider_cents = total_cents - commission_cents;

        Ok(Self {
            total_cents,
            rate_percent,
            commission_cents,
            provider_cents,
            processor_fee_cents: processor_fee_cents(total_cents),
        })
    }
}

/// What the card processor would charge on this amount: 2.9% + 30¢, rounded
/// half up. Recorded on the transaction for reporting, never deducted from
/// the provider share.
pub fn processor_fee_cents(total_cents: i64) -> i64 {
    ((total_cents as i128 * 29 + 500) / 1000) as i64 + 30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_preserves_the_total_exactly() {
        for total in [0, 1, 3, 99, 100, 101, 9_999, 10_000, 123_456_789] {
            for rate in 0..=100 {
                let split = CommissionSplit::compute(total, rate).unwrap();
                assert_eq!(
                    split.commission_cents + split.provider_cents,
                    total,
                    "total {} rate {}",
                    total,
                    rate
                );
                assert!(split.commission_cents >= 0);
                assert!(split.provider_cents >= 0);
            }
        }
    }

    #[test]
    fn hundred_euros_at_ten_percent() {
        let split = CommissionSplit::compute(10_000, 10).unwrap();
        assert_eq!(split.commission_cents, 1_000);
        assert_eq!(split.provider_cents, 9_000);
        assert_eq!(split.processor_fee_cents, 320);
    }

    #[test]
    fn commission_rounds_half_up() {
        // 5¢ at 10% is 0.5¢ of commission, which rounds up to 1¢.
        let split = CommissionSplit::compute(5, 10).unwrap();
        assert_eq!(split.commission_cents, 1);
        assert_eq!(split.provider_cents, 4);

        // 4¢ at 10% is 0.4¢, which rounds down.
        let split = CommissionSplit::compute(4, 10).unwrap();
        assert_eq!(split.commission_cents, 0);
        assert_eq!(split.provider_cents, 4);

        // 15¢ at 10% is 1.5¢, up to 2¢.
        let split = CommissionSplit::compute(15, 10).unwrap();
        assert_eq!(split.commission_cents, 2);
    }

    #[test]
    fn boundary_rates() {
        let split = CommissionSplit::compute(12_345, 0).unwrap();
        assert_eq!(split.commission_cents, 0);
        assert_eq!(split.provider_cents, 12_345);

        let split = CommissionSplit::compute(12_345, 100).unwrap();
        assert_eq!(split.commission_cents, 12_345);
        assert_eq!(split.provider_cents, 0);
    }

    #[test]
    fn huge_totals_do_not_overflow() {
        let total = i64::MAX / 2;
        let split = CommissionSplit::compute(total, 97).unwrap();
        assert_eq!(split.commission_cents + split.provider_cents, total);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(CommissionSplit::compute(-1, 10).is_err());
        assert!(CommissionSplit::compute(100, -1).is_err());
        assert!(CommissionSplit::compute(100, 101).is_err());
    }

    #[test]
    fn processor_fee_examples() {
        assert_eq!(processor_fee_cents(10_000), 320);
        assert_eq!(processor_fee_cents(0), 30);
        // 2.9% of 1000 is exactly 29, plus the fixed 30.
        assert_eq!(processor_fee_cents(1_000), 59);
    }
}
