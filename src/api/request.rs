//! Request types for the Vacation Engine API.
//!
//! Every request carries the snapshots it is evaluated against. The engine
//! keeps no state between requests.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::iso_date;
use crate::models::{Booking, BookingRequest, Employee, HolidaySet};

/// Request body for the `/working-days` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingDaysRequest {
    /// First day of the range (inclusive).
    #[serde(deserialize_with = "iso_date::deserialize")]
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive).
    #[serde(deserialize_with = "iso_date::deserialize")]
    pub end_date: NaiveDate,
}

/// Request body for the `/bookings/preview` and `/bookings` endpoints.
///
/// # Example
///
/// ```
/// use vacation_engine::api::BookingCommandRequest;
///
/// let json = r#"{
///     "employee_id": "emp_a",
///     "start_date": "2026-01-05",
///     "end_date": "2026-01-09",
///     "employees": [
///         { "id": "emp_a", "name": "Ana", "role": "Driver", "total_days": 22 }
///     ]
/// }"#;
///
/// let request: BookingCommandRequest = serde_json::from_str(json).unwrap();
/// assert!(request.bookings.is_empty());
/// assert!(request.holidays.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCommandRequest {
    /// The employee requesting leave.
    pub employee_id: String,
    /// First day of leave (inclusive).
    #[serde(deserialize_with = "iso_date::deserialize")]
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    #[serde(deserialize_with = "iso_date::deserialize")]
    pub end_date: NaiveDate,
    /// Snapshot of all employees.
    pub employees: Vec<Employee>,
    /// Snapshot of all existing bookings.
    #[serde(default)]
    pub bookings: Vec<Booking>,
    /// Holiday jurisdiction; the configured default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    /// Explicit holiday dates, used instead of the configured calendars.
    #[serde(
        default,
        deserialize_with = "iso_date::deserialize_optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub holidays: Option<Vec<NaiveDate>>,
    /// The instant "now" is evaluated against; the server clock when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_now: Option<NaiveDateTime>,
}

impl BookingCommandRequest {
    /// The tentative booking described by this request.
    pub fn booking_request(&self) -> BookingRequest {
        BookingRequest {
            employee_id: self.employee_id.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Request body for the `/bookings/cancel` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    /// The booking to cancel; must be present in `bookings`.
    pub booking_id: String,
    /// Snapshot of all employees.
    pub employees: Vec<Employee>,
    /// Snapshot of all existing bookings.
    pub bookings: Vec<Booking>,
    /// The instant "now" is evaluated against; the server clock when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_now: Option<NaiveDateTime>,
}

/// Request body for the `/employees/summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSummaryRequest {
    /// The employee to summarize.
    pub employee_id: String,
    /// Snapshot of all employees.
    pub employees: Vec<Employee>,
    /// Snapshot of all existing bookings.
    #[serde(default)]
    pub bookings: Vec<Booking>,
    /// The instant "now" is evaluated against; the server clock when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_now: Option<NaiveDateTime>,
}

impl From<Vec<NaiveDate>> for HolidaySet {
    fn from(dates: Vec<NaiveDate>) -> Self {
        HolidaySet::from_dates(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_deserialize_booking_command_with_overrides() {
        let json = r#"{
            "employee_id": "emp_a",
            "start_date": "2026-01-05",
            "end_date": "2026-01-09",
            "employees": [
                { "id": "emp_a", "name": "Ana", "role": "Driver", "totalDays": 22, "usedDays": 3 }
            ],
            "bookings": [
                { "id": "bk_1", "employee_id": "emp_b", "start_date": "2026-02-02",
                  "end_date": "2026-02-06", "work_days": 5 }
            ],
            "jurisdiction": "pt",
            "holidays": ["2026-01-01"],
            "reference_now": "2026-01-02T09:00:00"
        }"#;

        let request: BookingCommandRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employees[0].used_days, 3);
        assert_eq!(request.bookings.len(), 1);
        assert_eq!(request.jurisdiction.as_deref(), Some("pt"));
        assert_eq!(request.holidays, Some(vec![make_date("2026-01-01")]));
        assert!(request.reference_now.is_some());

        let booking = request.booking_request();
        assert_eq!(booking.start_date, make_date("2026-01-05"));
        assert_eq!(booking.end_date, make_date("2026-01-09"));
    }

    #[test]
    fn test_missing_employee_id_fails() {
        let json = r#"{ "start_date": "2026-01-05", "end_date": "2026-01-09", "employees": [] }"#;
        let error = serde_json::from_str::<BookingCommandRequest>(json).unwrap_err();
        assert!(error.to_string().contains("missing field `employee_id`"));
    }

    #[test]
    fn test_malformed_date_fails() {
        let json = r#"{ "start_date": "2026-13-01", "end_date": "2026-01-09" }"#;
        assert!(serde_json::from_str::<WorkingDaysRequest>(json).is_err());
    }

    #[test]
    fn test_unpadded_date_fails() {
        let json = r#"{ "start_date": "2026-1-5", "end_date": "2026-01-09" }"#;
        let error = serde_json::from_str::<WorkingDaysRequest>(json).unwrap_err();
        assert!(error.to_string().contains("Invalid date '2026-1-5'"));
    }

    #[test]
    fn test_snapshot_booking_dates_are_strict() {
        let json = r#"{
            "employee_id": "emp_a",
            "start_date": "2026-01-05",
            "end_date": "2026-01-09",
            "employees": [],
            "bookings": [
                { "id": "bk_1", "employee_id": "emp_b", "start_date": "+2026-02-02",
                  "end_date": "2026-02-06", "work_days": 5 }
            ]
        }"#;
        assert!(serde_json::from_str::<BookingCommandRequest>(json).is_err());
    }

    #[test]
    fn test_holiday_set_from_dates() {
        let set: HolidaySet = vec![make_date("2026-01-01"), make_date("2026-01-01")].into();
        assert_eq!(set.len(), 1);
    }
}
