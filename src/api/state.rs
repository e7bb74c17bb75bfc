//! Application state for the Vacation Engine API.

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::HolidaySet;

/// Shared application state.
///
/// Only read-only configuration is shared between requests; employee and
/// booking snapshots arrive with each request.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Resolves the holidays for a request.
    ///
    /// Explicit dates win over configured calendars. Otherwise the calendars
    /// of `jurisdiction` (or the configured default) covering `[start, end]`
    /// are merged.
    pub fn holidays_for(
        &self,
        explicit: Option<Vec<NaiveDate>>,
        jurisdiction: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<HolidaySet> {
        match explicit {
            Some(dates) => Ok(dates.into()),
            None => {
                let jurisdiction =
                    jurisdiction.unwrap_or(&self.config.settings().default_jurisdiction);
                self.config.holiday_set(jurisdiction, start, end)
            }
        }
    }

    /// The request's reference instant, or the local wall clock.
    pub fn reference_now(&self, requested: Option<NaiveDateTime>) -> NaiveDateTime {
        requested.unwrap_or_else(|| Local::now().naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::load("./config").expect("Failed to load config"))
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_explicit_holidays_override_calendar() {
        let state = create_test_state();
        let set = state
            .holidays_for(
                Some(vec![date("2026-01-06")]),
                None,
                date("2026-01-05"),
                date("2026-01-09"),
            )
            .unwrap();
        assert!(set.contains(date("2026-01-06")));
        assert!(!set.contains(date("2026-01-01")));
    }

    #[test]
    fn test_default_jurisdiction_calendar() {
        let state = create_test_state();
        let set = state
            .holidays_for(None, None, date("2026-01-05"), date("2026-01-09"))
            .unwrap();
        assert!(set.contains(date("2026-01-01")));
    }

    #[test]
    fn test_unknown_jurisdiction_fails() {
        let state = create_test_state();
        let err = state
            .holidays_for(None, Some("XX"), date("2026-01-05"), date("2026-01-09"))
            .unwrap_err();
        assert_eq!(err.code(), "HOLIDAY_CALENDAR_NOT_FOUND");
    }

    #[test]
    fn test_requested_reference_now_is_used() {
        let state = create_test_state();
        let now = date("2026-01-02").and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(state.reference_now(Some(now)), now);
    }
}
