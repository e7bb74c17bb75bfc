//! Booking outcome models.
//!
//! This module contains the values the orchestrator hands back to callers:
//! the [`BookingState`] machine, the signed [`BalanceDelta`], the live
//! [`Verdict`] with its validation trace, and the committed/cancelled results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{Booking, Employee};

/// Lifecycle of a booking inside the orchestrator.
///
/// ```text
/// Draft -> Validating -> Accepted -> Committed
///                    \-> Rejected <-/
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingState {
    /// Received, nothing evaluated yet.
    Draft,
    /// Rules are being evaluated.
    Validating,
    /// Every rule passed; the ledger has not been updated yet.
    Accepted,
    /// A rule or the ledger update failed. Terminal.
    Rejected,
    /// Booking and ledger debit form one unit. Terminal.
    Committed,
}

impl BookingState {
    /// Moves to `next`, failing with [`EngineError::InvalidTransition`] if the
    /// move is not an edge of the state machine.
    ///
    /// # Example
    ///
    /// ```
    /// use vacation_engine::models::BookingState;
    ///
    /// let state = BookingState::Draft.advance(BookingState::Validating).unwrap();
    /// assert!(state.advance(BookingState::Committed).is_err());
    /// ```
    pub fn advance(self, next: BookingState) -> EngineResult<BookingState> {
        use BookingState::*;
        let invalid = || EngineError::InvalidTransition {
            from: self.to_string(),
            to: next.to_string(),
        };
        if self.is_terminal() {
            return Err(invalid());
        }
        match (self, next) {
            (Draft, Validating)
            | (Validating, Accepted)
            | (Validating, Rejected)
            | (Accepted, Committed)
            | (Accepted, Rejected) => Ok(next),
            _ => Err(invalid()),
        }
    }

    /// Returns true for states that admit no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingState::Rejected | BookingState::Committed)
    }
}

impl std::fmt::Display for BookingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingState::Draft => write!(f, "Draft"),
            BookingState::Validating => write!(f, "Validating"),
            BookingState::Accepted => write!(f, "Accepted"),
            BookingState::Rejected => write!(f, "Rejected"),
            BookingState::Committed => write!(f, "Committed"),
        }
    }
}

/// A signed change to an employee's `used_days`.
///
/// Positive values debit the allowance (a booking was committed), negative
/// values credit it back (a booking was cancelled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceDelta(pub i64);

impl BalanceDelta {
    /// Delta consuming `days` of allowance.
    pub fn debit(days: u32) -> Self {
        BalanceDelta(i64::from(days))
    }

    /// Delta returning `days` of allowance.
    pub fn credit(days: u32) -> Self {
        BalanceDelta(-i64::from(days))
    }

    /// The opposite delta.
    pub fn inverse(self) -> Self {
        BalanceDelta(-self.0)
    }

    /// The signed value.
    pub fn value(self) -> i64 {
        self.0
    }
}

/// A recorded rule evaluation, one per rule the orchestrator ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationStep {
    /// Position of this step in the trace, starting at 1.
    pub step_number: u32,
    /// Stable identifier of the rule (e.g., "date_order").
    pub rule_id: String,
    /// Human-readable rule name.
    pub rule_name: String,
    /// Whether the rule passed.
    pub passed: bool,
    /// The inputs the rule looked at.
    pub input: serde_json::Value,
    /// Explanation of the outcome.
    pub reasoning: String,
}

/// A structured denial reason, safe to show to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denial {
    /// Machine-readable code (e.g., "ROLE_CONFLICT").
    pub code: String,
    /// Human-readable message naming the violated rule.
    pub message: String,
}

impl From<&EngineError> for Denial {
    fn from(error: &EngineError) -> Self {
        Denial {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// The side-effect-free verdict returned while a user is still editing a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// `Accepted` or `Rejected`.
    pub state: BookingState,
    /// The requested range.
    pub start_date: NaiveDate,
    /// The requested range.
    pub end_date: NaiveDate,
    /// Working days in the range, once the range is known to be well ordered.
    pub work_days: Option<u32>,
    /// Why the booking would be refused, if it would.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denial: Option<Denial>,
    /// Every rule evaluated, in order.
    pub trace: Vec<ValidationStep>,
}

impl Verdict {
    /// Returns true if the booking would be accepted.
    pub fn is_accepted(&self) -> bool {
        self.state == BookingState::Accepted
    }
}

/// A booking that passed validation together with its ledger debit.
///
/// The booking and the updated employee are one unit: callers must persist
/// both or neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedBooking {
    /// Always [`BookingState::Committed`].
    pub state: BookingState,
    /// The new booking.
    pub booking: Booking,
    /// `+work_days`.
    pub delta: BalanceDelta,
    /// The owning employee with the delta applied.
    pub employee: Employee,
}

/// The outcome of cancelling a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    /// The booking to remove.
    pub booking_id: String,
    /// `-work_days`.
    pub delta: BalanceDelta,
    /// The owning employee with the delta applied (clamped at zero).
    pub employee: Employee,
    /// True if the booking had already elapsed at the reference instant.
    pub was_completed: bool,
}
