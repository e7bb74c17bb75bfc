//! Balance reporting models.

use serde::{Deserialize, Serialize};

/// Per-employee balance breakdown, derived from bookings rather than the
/// stored counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// The employee summarised.
    pub employee_id: String,
    /// Annual allowance.
    pub total_days: u32,
    /// Working days in bookings that have already elapsed.
    pub completed_days: u32,
    /// Working days in ongoing or future bookings.
    pub scheduled_days: u32,
    /// `total_days - (completed_days + scheduled_days)`.
    pub available_days: i64,
    /// The counter as stored on the employee snapshot.
    pub recorded_used_days: u32,
}

/// Comparison of the stored `used_days` counter with the bookings that back it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// The employee reconciled.
    pub employee_id: String,
    /// `used_days` as stored.
    pub recorded_used_days: u32,
    /// Sum of `work_days` across the employee's bookings.
    pub derived_used_days: u32,
    /// `recorded - derived`; zero when consistent.
    pub drift: i64,
}

impl Reconciliation {
    /// Returns true if the stored counter matches the bookings.
    pub fn is_consistent(&self) -> bool {
        self.drift == 0
    }
}
