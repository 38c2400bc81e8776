//! Transaction amount formatting and range policy.

use crate::tlv::MAX_VALUE_LEN;
use crate::{PromptPayError, Result};

/// Upper sanity bound for a single payment, in baht.
pub const DEFAULT_MAX_AMOUNT: f64 = 1_000_000.0;

/// Amount as carried in the transaction-amount field, if it is carried at all.
///
/// Only finite amounts strictly above zero are encoded; everything else
/// (missing, zero, negative, NaN, infinite) produces an open-amount QR.
/// So does an amount too long for a 2-digit length header, rather than
/// being truncated into a different number.
pub fn encoded_amount(amount: Option<f64>) -> Option<String> {
    let text = amount
        .filter(|a| a.is_finite() && *a > 0.0)
        .map(|a| format!("{a:.2}"))?;
    if text.len() > MAX_VALUE_LEN {
        tracing::warn!(len = text.len(), "Amount too long to encode, omitting");
        return None;
    }
    Some(text)
}

/// Range policy applied to amounts before they reach the encoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountPolicy {
    pub max: f64,
}

impl Default for AmountPolicy {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX_AMOUNT,
        }
    }
}

impl AmountPolicy {
    pub fn new(max: f64) -> Self {
        Self { max }
    }

    /// Check a requested amount. `None` and `0` pass through as open-amount.
    pub fn check(&self, amount: Option<f64>) -> Result<Option<f64>> {
        let Some(a) = amount else {
            return Ok(None);
        };
        let reject = |reason: &str| {
            Err(PromptPayError::InvalidAmount {
                amount: a,
                reason: reason.to_string(),
            })
        };

        if !a.is_finite() {
            return reject("must be a finite number");
        }
        if a < 0.0 {
            return reject("must not be negative");
        }
        if a > self.max {
            return reject(&format!("must not exceed {:.2}", self.max));
        }
        // Positive amounts that print as 0.00 would yield a dynamic QR for nothing
        if a > 0.0 && encoded_amount(Some(a)).as_deref() == Some("0.00") {
            return reject("must be at least 0.01");
        }
        Ok(Some(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_amount_two_decimals() {
        assert_eq!(encoded_amount(Some(100.0)).as_deref(), Some("100.00"));
        assert_eq!(encoded_amount(Some(100.5)).as_deref(), Some("100.50"));
        assert_eq!(encoded_amount(Some(129.0)).as_deref(), Some("129.00"));
        assert_eq!(encoded_amount(Some(1_000_000.0)).as_deref(), Some("1000000.00"));
    }

    #[test]
    fn encoded_amount_omits_non_positive() {
        assert_eq!(encoded_amount(None), None);
        assert_eq!(encoded_amount(Some(0.0)), None);
        assert_eq!(encoded_amount(Some(-10.0)), None);
        assert_eq!(encoded_amount(Some(f64::NAN)), None);
        assert_eq!(encoded_amount(Some(f64::INFINITY)), None);
    }

    #[test]
    fn encoded_amount_omits_values_too_long_for_field() {
        assert_eq!(encoded_amount(Some(1e120)), None);
        // 96 integer digits + ".00" still fits
        assert_eq!(encoded_amount(Some(5e95)).map(|t| t.len()), Some(99));
    }

    #[test]
    fn policy_accepts_open_amount() {
        let policy = AmountPolicy::default();
        assert_eq!(policy.check(None), Ok(None));
        assert_eq!(policy.check(Some(0.0)), Ok(Some(0.0)));
    }

    #[test]
    fn policy_accepts_upper_bound() {
        let policy = AmountPolicy::default();
        assert_eq!(policy.check(Some(1_000_000.0)), Ok(Some(1_000_000.0)));
        assert_eq!(policy.check(Some(0.01)), Ok(Some(0.01)));
    }

    #[test]
    fn policy_rejects_out_of_range() {
        let policy = AmountPolicy::default();
        for bad in [-10.0, 1_000_000.01, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.001] {
            assert!(
                matches!(policy.check(Some(bad)), Err(PromptPayError::InvalidAmount { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn policy_max_is_overridable() {
        let policy = AmountPolicy::new(500.0);
        assert!(policy.check(Some(500.0)).is_ok());
        assert!(policy.check(Some(500.5)).is_err());
    }
}
