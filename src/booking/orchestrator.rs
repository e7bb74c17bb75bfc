//! Validate-then-commit orchestration for leave bookings.
//!
//! The [`BookingOrchestrator`] composes the calendar, balance, conflict and
//! ledger functions into the booking lifecycle. It works on snapshots borrowed
//! for the duration of one call and never reads a clock or global state: the
//! holiday set, the employee and booking lists, and the reference instant are
//! all supplied by the caller.
//!
//! Rules run in a fixed order and stop at the first failure:
//!
//! 1. the requesting employee exists in the snapshot
//! 2. `start <= end`
//! 3. neither boundary date is a holiday
//! 4. working days are counted
//! 5. the remaining balance covers the working days
//! 6. no other employee with the same role is on leave in the range

use chrono::NaiveDateTime;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::calculation::{
    RoleMatching, apply_delta, count_working_days, debit, find_overlap, has_sufficient_balance,
    is_holiday, is_past,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BalanceDelta, Booking, BookingRequest, BookingState, Cancellation, CommittedBooking, Denial,
    Employee, HolidaySet, ValidationStep, Verdict,
};

/// Tunable booking rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    /// How role labels are compared for conflict scoping.
    pub role_matching: RoleMatching,
    /// Whether bookings that have already elapsed may be cancelled.
    pub allow_past_cancellation: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            role_matching: RoleMatching::Exact,
            allow_past_cancellation: true,
        }
    }
}

/// The orchestrator for one consistent snapshot.
///
/// # Example
///
/// ```
/// use vacation_engine::booking::BookingOrchestrator;
/// use vacation_engine::models::{BookingRequest, Employee, HolidaySet};
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
/// let employees = vec![Employee {
///     id: "emp_a".to_string(),
///     name: "Ana".to_string(),
///     role: "Driver".to_string(),
///     color: String::new(),
///     total_days: 22,
///     used_days: 0,
/// }];
/// let holidays = HolidaySet::from_dates([d(1)]);
/// let now = d(2).and_hms_opt(9, 0, 0).unwrap();
///
/// let orchestrator = BookingOrchestrator::new(&holidays, &employees, &[], now);
/// let request = BookingRequest { employee_id: "emp_a".to_string(), start_date: d(5), end_date: d(9) };
///
/// let committed = orchestrator.commit(&request, "bk_001").unwrap();
/// assert_eq!(committed.booking.work_days, 5);
/// assert_eq!(committed.employee.used_days, 5);
/// ```
#[derive(Debug, Clone)]
pub struct BookingOrchestrator<'a> {
    holidays: &'a HolidaySet,
    employees: &'a [Employee],
    bookings: &'a [Booking],
    reference_now: NaiveDateTime,
    policy: BookingPolicy,
}

/// Result of running the rule chain once.
struct Evaluation {
    outcome: EngineResult<u32>,
    work_days: Option<u32>,
    trace: Vec<ValidationStep>,
}

impl Evaluation {
    fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        passed: bool,
        input: serde_json::Value,
        reasoning: String,
    ) {
        self.trace.push(ValidationStep {
            step_number: self.trace.len() as u32 + 1,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            passed,
            input,
            reasoning,
        });
    }

    fn fail(mut self, error: EngineError) -> Self {
        self.outcome = Err(error);
        self
    }
}

impl<'a> BookingOrchestrator<'a> {
    /// Creates an orchestrator with the default [`BookingPolicy`].
    pub fn new(
        holidays: &'a HolidaySet,
        employees: &'a [Employee],
        bookings: &'a [Booking],
        reference_now: NaiveDateTime,
    ) -> Self {
        Self {
            holidays,
            employees,
            bookings,
            reference_now,
            policy: BookingPolicy::default(),
        }
    }

    /// Replaces the booking policy.
    pub fn with_policy(mut self, policy: BookingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Looks up an employee in the snapshot.
    pub fn employee(&self, employee_id: &str) -> EngineResult<&'a Employee> {
        self.employees
            .iter()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| EngineError::UnknownEmployee {
                employee_id: employee_id.to_string(),
            })
    }

    /// Validates `request` and returns its working-day count.
    ///
    /// Has no side effects; the first failing rule's error is returned.
    pub fn validate(&self, request: &BookingRequest) -> EngineResult<u32> {
        self.evaluate(request).outcome
    }

    /// Produces a verdict for live feedback. Never fails and has no side effects.
    pub fn preview(&self, request: &BookingRequest) -> Verdict {
        let evaluation = self.evaluate(request);
        let (state, denial) = match &evaluation.outcome {
            Ok(_) => (BookingState::Accepted, None),
            Err(error) => (BookingState::Rejected, Some(Denial::from(error))),
        };
        Verdict {
            state,
            start_date: request.start_date,
            end_date: request.end_date,
            work_days: evaluation.work_days,
            denial,
            trace: evaluation.trace,
        }
    }

    /// Validates `request` and, if every rule passes, produces the booking
    /// together with its ledger debit.
    ///
    /// Either both the booking and the updated employee are returned, or an
    /// error is; there is no partial result.
    pub fn commit(
        &self,
        request: &BookingRequest,
        booking_id: impl Into<String>,
    ) -> EngineResult<CommittedBooking> {
        let booking_id = booking_id.into();
        let mut state = BookingState::Draft.advance(BookingState::Validating)?;

        let work_days = match self.validate(request) {
            Ok(days) => days,
            Err(error) => {
                state.advance(BookingState::Rejected)?;
                info!(
                    employee_id = %request.employee_id,
                    booking_id = %booking_id,
                    code = error.code(),
                    "Booking rejected"
                );
                return Err(error);
            }
        };
        state = state.advance(BookingState::Accepted)?;

        let ledger_result = self
            .ensure_new_booking_id(&booking_id)
            .and_then(|_| self.employee(&request.employee_id))
            .and_then(|owner| debit(owner, &booking_id, work_days));

        let employee = match ledger_result {
            Ok(employee) => employee,
            Err(error) => {
                state.advance(BookingState::Rejected)?;
                warn!(
                    employee_id = %request.employee_id,
                    booking_id = %booking_id,
                    error = %error,
                    "Ledger update failed, booking rolled back"
                );
                return Err(error);
            }
        };
        state = state.advance(BookingState::Committed)?;

        info!(
            employee_id = %employee.id,
            booking_id = %booking_id,
            work_days,
            used_days = employee.used_days,
            "Booking committed"
        );

        Ok(CommittedBooking {
            state,
            booking: Booking {
                id: booking_id,
                employee_id: request.employee_id.clone(),
                start_date: request.start_date,
                end_date: request.end_date,
                work_days,
            },
            delta: BalanceDelta::debit(work_days),
            employee,
        })
    }

    /// Produces the compensating credit for removing `booking`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::LedgerInconsistency`] if the owning employee is not in the snapshot.
    /// - [`EngineError::PastCancellationForbidden`] if the booking has elapsed and
    ///   the policy forbids reversing history.
    pub fn cancel(&self, booking: &Booking) -> EngineResult<Cancellation> {
        let owner = self
            .employees
            .iter()
            .find(|e| e.id == booking.employee_id)
            .ok_or_else(|| EngineError::LedgerInconsistency {
                booking_id: booking.id.clone(),
                message: format!("owning employee '{}' not found", booking.employee_id),
            })?;

        let was_completed = is_past(booking.end_date, self.reference_now);
        if was_completed {
            if !self.policy.allow_past_cancellation {
                return Err(EngineError::PastCancellationForbidden {
                    booking_id: booking.id.clone(),
                    end_date: booking.end_date,
                });
            }
            warn!(
                booking_id = %booking.id,
                employee_id = %owner.id,
                end_date = %booking.end_date,
                "Cancelling a booking that has already elapsed"
            );
        }

        let delta = BalanceDelta::credit(booking.work_days);
        let employee = apply_delta(owner, delta);

        info!(
            booking_id = %booking.id,
            employee_id = %employee.id,
            work_days = booking.work_days,
            used_days = employee.used_days,
            "Booking cancelled"
        );

        Ok(Cancellation {
            booking_id: booking.id.clone(),
            delta,
            employee,
            was_completed,
        })
    }

    /// Recomputes the working days of an existing booking from its dates.
    pub fn recalculate_work_days(&self, booking: &Booking) -> EngineResult<u32> {
        let days = count_working_days(booking.start_date, booking.end_date)?;
        if days != booking.work_days {
            debug!(
                booking_id = %booking.id,
                cached = booking.work_days,
                recalculated = days,
                "Cached work days differ from recalculation"
            );
        }
        Ok(days)
    }

    fn ensure_new_booking_id(&self, booking_id: &str) -> EngineResult<()> {
        if self.bookings.iter().any(|b| b.id == booking_id) {
            return Err(EngineError::LedgerInconsistency {
                booking_id: booking_id.to_string(),
                message: "a booking with this id already exists".to_string(),
            });
        }
        Ok(())
    }

    fn evaluate(&self, request: &BookingRequest) -> Evaluation {
        let mut evaluation = Evaluation {
            outcome: Ok(0),
            work_days: None,
            trace: Vec::new(),
        };
        let start = request.start_date;
        let end = request.end_date;

        // Employee lookup
        let employee = match self.employee(&request.employee_id) {
            Ok(employee) => {
                evaluation.record(
                    "employee_lookup",
                    "Employee Lookup",
                    true,
                    json!({ "employee_id": request.employee_id }),
                    format!("Employee '{}' has role '{}'", employee.id, employee.role),
                );
                employee
            }
            Err(error) => {
                evaluation.record(
                    "employee_lookup",
                    "Employee Lookup",
                    false,
                    json!({ "employee_id": request.employee_id }),
                    error.to_string(),
                );
                return evaluation.fail(error);
            }
        };

        // Date order
        let ordered = start <= end;
        evaluation.record(
            "date_order",
            "Date Order",
            ordered,
            json!({ "start_date": start, "end_date": end }),
            if ordered {
                format!("{} is on or before {}", start, end)
            } else {
                format!("{} is after {}", start, end)
            },
        );
        if !ordered {
            return evaluation.fail(EngineError::invalid_range(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }

        // Holiday boundaries
        let holiday = [start, end]
            .into_iter()
            .find(|date| is_holiday(*date, self.holidays));
        evaluation.record(
            "holiday_boundary",
            "Holiday Boundary",
            holiday.is_none(),
            json!({ "start_date": start, "end_date": end, "holidays_known": self.holidays.len() }),
            match holiday {
                Some(date) => format!("{} is a public holiday", date),
                None => "Neither boundary date is a public holiday".to_string(),
            },
        );
        if let Some(date) = holiday {
            return evaluation.fail(EngineError::HolidayConflict { date });
        }

        // Working days
        let work_days = match count_working_days(start, end) {
            Ok(days) => days,
            Err(error) => return evaluation.fail(error),
        };
        evaluation.work_days = Some(work_days);
        evaluation.record(
            "working_days",
            "Working Days",
            true,
            json!({ "start_date": start, "end_date": end }),
            format!("{} working days between {} and {}", work_days, start, end),
        );

        // Balance
        let available = employee.available_days();
        let sufficient =
            match has_sufficient_balance(i64::from(work_days), employee.total_days, employee.used_days)
            {
                Ok(sufficient) => sufficient,
                Err(error) => return evaluation.fail(error),
            };
        evaluation.record(
            "balance",
            "Leave Balance",
            sufficient,
            json!({
                "requested": work_days,
                "total_days": employee.total_days,
                "used_days": employee.used_days
            }),
            format!("{} requested, {} available", work_days, available),
        );
        if !sufficient {
            return evaluation.fail(EngineError::InsufficientBalance {
                employee_id: employee.id.clone(),
                requested: i64::from(work_days),
                available,
            });
        }

        // Role overlap
        let conflict = find_overlap(
            request,
            self.bookings,
            self.employees,
            self.policy.role_matching,
        );
        evaluation.record(
            "role_overlap",
            "Role Overlap",
            conflict.is_none(),
            json!({
                "role": employee.role,
                "existing_bookings": self.bookings.len()
            }),
            match conflict {
                Some(booking) => format!(
                    "Booking '{}' of employee '{}' overlaps the requested range",
                    booking.id, booking.employee_id
                ),
                None => format!("No other {} is on leave in this period", employee.role),
            },
        );
        if let Some(booking) = conflict {
            let employee_name = self
                .employees
                .iter()
                .find(|e| e.id == booking.employee_id)
                .map(|e| e.name.clone())
                .unwrap_or_default();
            return evaluation.fail(EngineError::RoleConflict {
                role: employee.role.clone(),
                employee_id: booking.employee_id.clone(),
                employee_name,
                booking_id: booking.id.clone(),
                start_date: booking.start_date,
                end_date: booking.end_date,
            });
        }

        evaluation.outcome = Ok(work_days);
        evaluation
    }
}
