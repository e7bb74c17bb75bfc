//! Error types for the Vacation Engine.
//!
//! Every denial the engine can produce is a variant of [`EngineError`].
//! Validation failures are ordinary values returned through [`EngineResult`],
//! never panics, so callers can surface the exact rule that was violated.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Vacation Engine.
///
/// # Example
///
/// ```
/// use vacation_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::HolidayConflict {
///     date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
/// };
/// assert_eq!(error.to_string(), "Cannot book leave on a public holiday: 2026-01-01");
/// assert_eq!(error.code(), "HOLIDAY_CONFLICT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A date range or day count was invalid.
    #[error("Invalid range: {message}")]
    InvalidRange {
        /// A description of what made the range invalid.
        message: String,
    },

    /// A boundary date of the booking falls on a recognised holiday.
    #[error("Cannot book leave on a public holiday: {date}")]
    HolidayConflict {
        /// The offending holiday date.
        date: NaiveDate,
    },

    /// The requested working days exceed the employee's remaining allowance.
    #[error(
        "Insufficient balance for employee '{employee_id}': requested {requested} days, {available} available"
    )]
    InsufficientBalance {
        /// The employee whose balance was checked.
        employee_id: String,
        /// Working days requested.
        requested: i64,
        /// Days still available (may be negative if the snapshot has drifted).
        available: i64,
    },

    /// Another employee with the same role is already on leave in the range.
    #[error(
        "A {role} is already on leave in this period: {employee_name} from {start_date} to {end_date}"
    )]
    RoleConflict {
        /// The shared role.
        role: String,
        /// The conflicting employee's id.
        employee_id: String,
        /// The conflicting employee's display name.
        employee_name: String,
        /// The conflicting booking's id.
        booking_id: String,
        /// Start of the conflicting booking.
        start_date: NaiveDate,
        /// End of the conflicting booking.
        end_date: NaiveDate,
    },

    /// The ledger cannot be adjusted safely.
    #[error("Ledger inconsistency for booking '{booking_id}': {message}")]
    LedgerInconsistency {
        /// The booking being committed or cancelled.
        booking_id: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// The requesting employee is not present in the supplied snapshot.
    #[error("Employee not found: {employee_id}")]
    UnknownEmployee {
        /// The id that could not be resolved.
        employee_id: String,
    },

    /// The booking to cancel is not present in the supplied snapshot.
    #[error("Booking not found: {booking_id}")]
    UnknownBooking {
        /// The id that could not be resolved.
        booking_id: String,
    },

    /// A date string was not a valid `YYYY-MM-DD` calendar date.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// A booking attempted an illegal state transition.
    #[error("Invalid booking state transition from {from} to {to}")]
    InvalidTransition {
        /// The state the booking was in.
        from: String,
        /// The state that was requested.
        to: String,
    },

    /// Cancelling an already completed booking is disabled by configuration.
    #[error("Booking '{booking_id}' ended on {end_date} and can no longer be cancelled")]
    PastCancellationForbidden {
        /// The booking that was to be cancelled.
        booking_id: String,
        /// Its (inclusive) end date.
        end_date: NaiveDate,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No holiday calendar is configured for the jurisdiction and year.
    #[error("Holiday calendar not found for '{jurisdiction}' in {year}")]
    HolidayCalendarNotFound {
        /// The requested jurisdiction.
        jurisdiction: String,
        /// The requested year.
        year: i32,
    },
}

impl EngineError {
    /// Returns a stable, machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidRange { .. } => "INVALID_RANGE",
            EngineError::HolidayConflict { .. } => "HOLIDAY_CONFLICT",
            EngineError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            EngineError::RoleConflict { .. } => "ROLE_CONFLICT",
            EngineError::LedgerInconsistency { .. } => "LEDGER_INCONSISTENCY",
            EngineError::UnknownEmployee { .. } => "UNKNOWN_EMPLOYEE",
            EngineError::UnknownBooking { .. } => "UNKNOWN_BOOKING",
            EngineError::InvalidDate { .. } => "INVALID_DATE",
            EngineError::InvalidTransition { .. } => "INVALID_TRANSITION",
            EngineError::PastCancellationForbidden { .. } => "PAST_CANCELLATION_FORBIDDEN",
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                "CONFIG_ERROR"
            }
            EngineError::HolidayCalendarNotFound { .. } => "HOLIDAY_CALENDAR_NOT_FOUND",
        }
    }

    /// Shorthand for an [`EngineError::InvalidRange`].
    pub fn invalid_range(message: impl Into<String>) -> Self {
        EngineError::InvalidRange {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
