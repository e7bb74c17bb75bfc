//! Leave balance validation.

use crate::error::{EngineError, EngineResult};

/// Decides whether `requested_days` fits in the remaining allowance.
///
/// The boundary is inclusive: a request equal to the remaining balance fits.
/// A zero-day request always fits, even against a drifted snapshot where
/// `used_days > total_days`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRange`] for a negative request.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::has_sufficient_balance;
///
/// assert!(has_sufficient_balance(12, 22, 10).unwrap());
/// assert!(!has_sufficient_balance(13, 22, 10).unwrap());
/// assert!(has_sufficient_balance(-1, 22, 10).is_err());
/// ```
pub fn has_sufficient_balance(
    requested_days: i64,
    total_days: u32,
    used_days: u32,
) -> EngineResult<bool> {
    if requested_days < 0 {
        return Err(EngineError::invalid_range(format!(
            "requested days cannot be negative (got {})",
            requested_days
        )));
    }
    if requested_days == 0 {
        return Ok(true);
    }
    let remaining = i64::from(total_days) - i64::from(used_days);
    Ok(requested_days <= remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// BV-001: exact remaining balance is allowed
    #[test]
    fn test_exact_balance_is_sufficient() {
        assert!(has_sufficient_balance(5, 22, 17).unwrap());
    }

    /// BV-002: one over the remaining balance is refused
    #[test]
    fn test_one_over_balance_is_insufficient() {
        assert!(!has_sufficient_balance(6, 22, 17).unwrap());
    }

    /// BV-003: zero-day request
    #[test]
    fn test_zero_request_always_fits() {
        assert!(has_sufficient_balance(0, 0, 0).unwrap());
        assert!(has_sufficient_balance(0, 10, 12).unwrap());
    }

    /// BV-004: negative request is a contract violation
    #[test]
    fn test_negative_request_is_invalid() {
        let err = has_sufficient_balance(-3, 22, 0).unwrap_err();
        assert_eq!(err.code(), "INVALID_RANGE");
    }

    #[test]
    fn test_exhausted_balance() {
        assert!(!has_sufficient_balance(1, 22, 22).unwrap());
    }

    #[test]
    fn test_drifted_snapshot_refuses_positive_request() {
        assert!(!has_sufficient_balance(1, 10, 12).unwrap());
    }

    proptest! {
        /// Property: the boundary is inclusive and exact.
        #[test]
        fn inclusive_boundary(total in 0u32..400, used_fraction in 0u32..=100) {
            let used = total * used_fraction / 100;
            let remaining = i64::from(total - used);
            prop_assert!(has_sufficient_balance(remaining, total, used).unwrap());
            prop_assert!(!has_sufficient_balance(remaining + 1, total, used).unwrap());
        }
    }
}
