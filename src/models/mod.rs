//! Core data models for the Vacation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod absence;
mod balance;
mod booking;
mod employee;
mod holiday;
pub(crate) mod iso_date;
mod outcome;

pub use absence::{Absence, absences_for};
pub use balance::{BalanceSummary, Reconciliation};
pub use booking::{Booking, BookingRequest, BookingStatus};
pub use employee::Employee;
pub use holiday::{Holiday, HolidayCalendar, HolidaySet};
pub use outcome::{
    BalanceDelta, BookingState, Cancellation, CommittedBooking, Denial, ValidationStep, Verdict,
};
