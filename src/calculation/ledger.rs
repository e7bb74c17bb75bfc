//! Employee ledger: applying balance deltas and deriving balances from bookings.
//!
//! All functions here take snapshots and return new values. The stored
//! `used_days` counter is only ever moved by deltas, never overwritten.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{BalanceDelta, BalanceSummary, Booking, BookingStatus, Employee, Reconciliation};

/// Returns a copy of `employee` with `used_days = max(0, used_days + delta)`.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::apply_delta;
/// use vacation_engine::models::{BalanceDelta, Employee};
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Ana".to_string(),
///     role: "Driver".to_string(),
///     color: String::new(),
///     total_days: 22,
///     used_days: 3,
/// };
///
/// assert_eq!(apply_delta(&employee, BalanceDelta::debit(5)).used_days, 8);
/// assert_eq!(apply_delta(&employee, BalanceDelta::credit(5)).used_days, 0);
/// ```
pub fn apply_delta(employee: &Employee, delta: BalanceDelta) -> Employee {
    let updated = i64::from(employee.used_days).saturating_add(delta.value());
    let used_days = u32::try_from(updated.max(0)).unwrap_or(u32::MAX);
    Employee {
        used_days,
        ..employee.clone()
    }
}

/// Debits `days` for `booking_id`, failing instead of saturating the counter.
pub fn debit(employee: &Employee, booking_id: &str, days: u32) -> EngineResult<Employee> {
    let used_days = employee
        .used_days
        .checked_add(days)
        .ok_or_else(|| EngineError::LedgerInconsistency {
            booking_id: booking_id.to_string(),
            message: format!(
                "debiting {} days would overflow the used-days counter of employee '{}'",
                days, employee.id
            ),
        })?;
    debug!(
        employee_id = %employee.id,
        booking_id,
        days,
        used_days,
        "Ledger debit"
    );
    Ok(Employee {
        used_days,
        ..employee.clone()
    })
}

/// Breaks an employee's allowance down into completed and scheduled days.
///
/// Bookings owned by other employees are ignored.
pub fn summarize(
    employee: &Employee,
    bookings: &[Booking],
    reference_now: NaiveDateTime,
) -> BalanceSummary {
    let (completed_days, scheduled_days) = bookings
        .iter()
        .filter(|b| b.employee_id == employee.id)
        .fold((0u32, 0u32), |(completed, scheduled), b| {
            match b.status(reference_now) {
                BookingStatus::Completed => (completed.saturating_add(b.work_days), scheduled),
                BookingStatus::Scheduled => (completed, scheduled.saturating_add(b.work_days)),
            }
        });

    BalanceSummary {
        employee_id: employee.id.clone(),
        total_days: employee.total_days,
        completed_days,
        scheduled_days,
        available_days: i64::from(employee.total_days)
            - i64::from(completed_days)
            - i64::from(scheduled_days),
        recorded_used_days: employee.used_days,
    }
}

/// Compares the stored `used_days` with the sum of the employee's bookings.
pub fn reconcile(employee: &Employee, bookings: &[Booking]) -> Reconciliation {
    let derived_used_days = bookings
        .iter()
        .filter(|b| b.employee_id == employee.id)
        .fold(0u32, |acc, b| acc.saturating_add(b.work_days));

    Reconciliation {
        employee_id: employee.id.clone(),
        recorded_used_days: employee.used_days,
        derived_used_days,
        drift: i64::from(employee.used_days) - i64::from(derived_used_days),
    }
}
