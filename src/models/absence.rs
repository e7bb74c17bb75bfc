//! Absence records.
//!
//! Absences are single-day entries kept for reporting. They never touch the
//! leave balance and are ignored by conflict detection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day an employee was absent, with a free-text reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    /// The absent employee.
    pub employee_id: String,
    /// The day of absence.
    pub date: NaiveDate,
    /// Free-text reason (e.g., "medical appointment").
    #[serde(default)]
    pub reason: String,
}

/// Returns the absences of `employee_id` within `[start, end]`, sorted by date.
///
/// # Example
///
/// ```
/// use vacation_engine::models::{Absence, absences_for};
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
/// let absences = vec![
///     Absence { employee_id: "emp_001".into(), date: d(10), reason: "doctor".into() },
///     Absence { employee_id: "emp_002".into(), date: d(11), reason: "exam".into() },
/// ];
///
/// let found = absences_for(&absences, "emp_001", d(1), d(31));
/// assert_eq!(found.len(), 1);
/// ```
pub fn absences_for<'a>(
    absences: &'a [Absence],
    employee_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&'a Absence> {
    let mut found: Vec<&Absence> = absences
        .iter()
        .filter(|a| a.employee_id == employee_id && a.date >= start && a.date <= end)
        .collect();
    found.sort_by_key(|a| a.date);
    found
}
