//! Booking (vacation) models.
//!
//! This module contains the [`Booking`] type for committed leave, the
//! [`BookingRequest`] a caller submits before validation, and the
//! [`BookingStatus`] classification used by reporting views.

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calculation::is_past;

use super::iso_date;

/// A tentative booking: who wants leave, and for which inclusive date range.
///
/// # Example
///
/// ```
/// use vacation_engine::models::BookingRequest;
/// use chrono::NaiveDate;
///
/// let request = BookingRequest {
///     employee_id: "emp_001".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
/// };
/// assert!(request.overlaps(
///     NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// The employee requesting leave.
    pub employee_id: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
}

impl BookingRequest {
    /// Returns true if this request shares at least one day with `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}

/// A committed leave booking.
///
/// Both bounds are inclusive. `work_days` is computed once at commit time and
/// cached; it is only recomputed on explicit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for the booking.
    pub id: String,
    /// The owning employee.
    pub employee_id: String,
    /// First day of leave (inclusive).
    #[serde(deserialize_with = "iso_date::deserialize")]
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    #[serde(deserialize_with = "iso_date::deserialize")]
    pub end_date: NaiveDate,
    /// Chargeable working days, cached at creation.
    pub work_days: u32,
}

/// Whether a booking has already elapsed relative to a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// The booking's last day is before the reference day.
    Completed,
    /// The booking is ongoing or in the future.
    Scheduled,
}

impl Booking {
    /// Returns true if this booking shares at least one day with `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    /// Classifies the booking as completed or scheduled.
    ///
    /// # Example
    ///
    /// ```
    /// use vacation_engine::models::{Booking, BookingStatus};
    /// use chrono::NaiveDate;
    ///
    /// let booking = Booking {
    ///     id: "bk_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
    ///     work_days: 5,
    /// };
    /// let friday_noon = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap().and_hms_opt(12, 0, 0).unwrap();
    /// let saturday = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// assert_eq!(booking.status(friday_noon), BookingStatus::Scheduled);
    /// assert_eq!(booking.status(saturday), BookingStatus::Completed);
    /// ```
    pub fn status(&self, reference_now: NaiveDateTime) -> BookingStatus {
        if is_past(self.end_date, reference_now) {
            BookingStatus::Completed
        } else {
            BookingStatus::Scheduled
        }
    }

    /// Returns the exclusive end date used by calendar widgets with half-open ranges.
    ///
    /// Presentation only; the engine itself always works with the inclusive end.
    /// `None` when the end date is the last representable date.
    pub fn display_end_exclusive(&self) -> Option<NaiveDate> {
        self.end_date.checked_add_days(Days::new(1))
    }
}
