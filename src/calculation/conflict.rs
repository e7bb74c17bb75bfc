//! Role-scoped overlap detection.
//!
//! Two employees sharing a role may not be on leave on the same day. Overlap
//! with the requester's own bookings is not a conflict, and employees in
//! different roles never conflict.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Booking, BookingRequest, Employee};

/// How role labels are compared when scoping conflicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleMatching {
    /// Byte-for-byte equality.
    #[default]
    Exact,
    /// Trimmed, inner whitespace collapsed, case-folded.
    Normalized,
}

impl RoleMatching {
    /// Returns true if the two role labels denote the same role.
    ///
    /// # Example
    ///
    /// ```
    /// use vacation_engine::calculation::RoleMatching;
    ///
    /// assert!(!RoleMatching::Exact.same_role("Driver", " driver "));
    /// assert!(RoleMatching::Normalized.same_role("Truck  Driver", "truck driver"));
    /// ```
    pub fn same_role(self, a: &str, b: &str) -> bool {
        match self {
            RoleMatching::Exact => a == b,
            RoleMatching::Normalized => normalize_role(a) == normalize_role(b),
        }
    }
}

fn normalize_role(role: &str) -> String {
    role.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds the first existing booking that conflicts with `candidate`.
///
/// A booking conflicts when its owner is a different employee with the same
/// role as the candidate's owner and the inclusive date ranges share at least
/// one day. Bookings whose owner is missing from `employees` are skipped.
/// Returns `None` if the candidate's own employee is not in `employees`.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::{find_overlap, RoleMatching};
/// use vacation_engine::models::{Booking, BookingRequest, Employee};
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
/// let driver = |id: &str| Employee {
///     id: id.to_string(),
///     name: id.to_string(),
///     role: "Driver".to_string(),
///     color: String::new(),
///     total_days: 22,
///     used_days: 0,
/// };
/// let employees = vec![driver("a"), driver("b")];
/// let existing = vec![Booking {
///     id: "bk_1".to_string(),
///     employee_id: "a".to_string(),
///     start_date: d(5),
///     end_date: d(9),
///     work_days: 5,
/// }];
///
/// let candidate = BookingRequest { employee_id: "b".to_string(), start_date: d(7), end_date: d(8) };
/// let conflict = find_overlap(&candidate, &existing, &employees, RoleMatching::Exact);
/// assert_eq!(conflict.map(|b| b.id.as_str()), Some("bk_1"));
/// ```
pub fn find_overlap<'a>(
    candidate: &BookingRequest,
    existing: &'a [Booking],
    employees: &[Employee],
    matching: RoleMatching,
) -> Option<&'a Booking> {
    let by_id: HashMap<&str, &Employee> = employees.iter().map(|e| (e.id.as_str(), e)).collect();
    let requester = by_id.get(candidate.employee_id.as_str())?;

    existing.iter().find(|booking| {
        if booking.employee_id == requester.id {
            return false;
        }
        let Some(owner) = by_id.get(booking.employee_id.as_str()) else {
            return false;
        };
        matching.same_role(&owner.role, &requester.role)
            && candidate.overlaps(booking.start_date, booking.end_date)
    })
}
