//! Calendar utilities: working-day counting, holiday lookup, and day-granular
//! date comparison.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::HolidaySet;

/// Returns true for Monday through Friday.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::is_working_day;
/// use chrono::NaiveDate;
///
/// // 2026-01-10 is a Saturday
/// assert!(!is_working_day(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()));
/// assert!(is_working_day(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()));
/// ```
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the working days in the inclusive range `[start, end]`.
///
/// Only weekends are excluded. Holidays inside the range are still counted;
/// holiday handling is a separate booking rule on the range boundaries.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRange`] if `start > end`.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::count_working_days;
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
/// let next_monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// assert_eq!(count_working_days(monday, next_monday).unwrap(), 6);
///
/// assert!(count_working_days(next_monday, monday).is_err());
/// ```
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> EngineResult<u32> {
    if start > end {
        return Err(EngineError::invalid_range(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }

    let total_days = (end - start).num_days() + 1;
    let full_weeks = total_days / 7;
    let remainder = total_days % 7;

    // The leftover days start on the same weekday as `start`.
    let mut weekday = start.weekday();
    let mut leftover_working = 0;
    for _ in 0..remainder {
        if !matches!(weekday, Weekday::Sat | Weekday::Sun) {
            leftover_working += 1;
        }
        weekday = weekday.succ();
    }

    u32::try_from(full_weeks * 5 + leftover_working)
        .map_err(|_| EngineError::invalid_range("range is too large to count"))
}

/// Returns true if `date` is in the holiday set.
pub fn is_holiday(date: NaiveDate, holidays: &HolidaySet) -> bool {
    holidays.contains(date)
}

/// Returns true if `date` is strictly before the day of `reference_now`.
///
/// Time of day is discarded, so a date is never "past" on its own day.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::is_past;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
/// let same_day_evening = day.and_hms_opt(23, 0, 0).unwrap();
/// assert!(!is_past(day, same_day_evening));
/// assert!(is_past(day, day.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap()));
/// ```
pub fn is_past(date: NaiveDate, reference_now: NaiveDateTime) -> bool {
    date < reference_now.date()
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Four-digit year, zero-padded month and day, no sign and no time part.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::parse_iso_date;
///
/// assert!(parse_iso_date("2026-01-05").is_ok());
/// assert!(parse_iso_date("2026-1-5").is_err());
/// assert!(parse_iso_date("+2026-01-05").is_err());
/// ```
pub fn parse_iso_date(value: &str) -> EngineResult<NaiveDate> {
    let invalid = || EngineError::InvalidDate {
        value: value.to_string(),
    };
    let well_formed = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

/// Iterates every calendar day in `[start, end]`. Empty if `start > end`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let mut next = Some(start);
    std::iter::from_fn(move || {
        let current = next.filter(|d| *d <= end)?;
        next = current.checked_add_days(Days::new(1));
        Some(current)
    })
}
