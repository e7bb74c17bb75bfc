//! Holiday calendar models.
//!
//! A [`HolidayCalendar`] is the versioned, externally supplied list of public
//! holidays for one jurisdiction and year. Validation consults a
//! [`HolidaySet`], the date-only lookup view built from one or more calendars.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single public holiday.
///
/// # Example
///
/// ```
/// use vacation_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2026, 4, 25).unwrap(),
///     name: "Dia da Liberdade".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    #[serde(default)]
    pub name: String,
}

/// The holiday list for one jurisdiction and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    /// Jurisdiction code (e.g., "PT").
    pub jurisdiction: String,
    /// Calendar year covered by this list.
    pub year: i32,
    /// Version label of the published list.
    pub version: String,
    /// The holidays themselves.
    pub holidays: Vec<Holiday>,
}

impl HolidayCalendar {
    /// Returns the holidays whose date does not fall in [`HolidayCalendar::year`].
    pub fn misplaced_holidays(&self) -> Vec<&Holiday> {
        self.holidays
            .iter()
            .filter(|h| h.date.year() != self.year)
            .collect()
    }

    /// Builds the lookup set for this calendar.
    pub fn to_set(&self) -> HolidaySet {
        self.holidays.iter().map(|h| h.date).collect()
    }
}

/// An immutable set of non-working calendar dates.
///
/// # Example
///
/// ```
/// use vacation_engine::models::HolidaySet;
/// use chrono::NaiveDate;
///
/// let new_year = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let holidays = HolidaySet::from_dates([new_year]);
///
/// assert!(holidays.contains(new_year));
/// assert!(!holidays.contains(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    /// Creates an empty holiday set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a holiday set from a list of dates. Duplicates collapse.
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Returns true if `date` is in the set.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Returns a new set holding the dates of both sets.
    pub fn union(&self, other: &HolidaySet) -> HolidaySet {
        Self {
            dates: self.dates.union(&other.dates).copied().collect(),
        }
    }

    /// Number of distinct dates in the set.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the set has no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self::from_dates(iter)
    }
}
