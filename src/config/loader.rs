//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings
//! and holiday calendars from YAML files.

use std::fs;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{HolidayCalendar, HolidaySet};

use super::types::EngineSettings;

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── engine.yaml          # Engine settings
/// └── holidays/
///     └── pt-2026.yaml     # One holiday calendar per jurisdiction and year
/// ```
///
/// # Example
///
/// ```no_run
/// use vacation_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config").unwrap();
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
/// let holidays = loader.holiday_set("PT", start, end).unwrap();
/// println!("{} holidays apply", holidays.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: EngineSettings,
    calendars: Vec<HolidayCalendar>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `engine.yaml` or the `holidays` directory is missing
    /// - Any file contains invalid YAML
    /// - A calendar lists a date outside its year, or two calendars cover
    ///   the same jurisdiction and year
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let calendars = Self::load_calendars(&path.join("holidays"))?;

        Self::from_parts(settings, calendars)
    }

    /// Builds a loader from already parsed parts, applying the same checks as [`ConfigLoader::load`].
    pub fn from_parts(
        settings: EngineSettings,
        calendars: Vec<HolidayCalendar>,
    ) -> EngineResult<Self> {
        for (i, calendar) in calendars.iter().enumerate() {
            if let Some(holiday) = calendar.misplaced_holidays().first() {
                return Err(EngineError::ConfigParseError {
                    path: format!("holidays/{}-{}", calendar.jurisdiction, calendar.year),
                    message: format!(
                        "holiday {} is outside calendar year {}",
                        holiday.date, calendar.year
                    ),
                });
            }
            let duplicate = calendars[..i].iter().any(|other| {
                other.year == calendar.year
                    && other.jurisdiction.eq_ignore_ascii_case(&calendar.jurisdiction)
            });
            if duplicate {
                return Err(EngineError::ConfigParseError {
                    path: format!("holidays/{}-{}", calendar.jurisdiction, calendar.year),
                    message: "more than one calendar for this jurisdiction and year".to_string(),
                });
            }
        }

        Ok(Self {
            settings,
            calendars,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all calendar files from the holidays directory.
    fn load_calendars(holidays_dir: &Path) -> EngineResult<Vec<HolidayCalendar>> {
        let dir_str = holidays_dir.display().to_string();

        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut calendars = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                let calendar = Self::load_yaml::<HolidayCalendar>(&path)?;
                debug!(
                    jurisdiction = %calendar.jurisdiction,
                    year = calendar.year,
                    version = %calendar.version,
                    holidays = calendar.holidays.len(),
                    "Loaded holiday calendar"
                );
                calendars.push(calendar);
            }
        }

        // read_dir order is platform dependent
        calendars.sort_by(|a, b| {
            a.jurisdiction
                .cmp(&b.jurisdiction)
                .then(a.year.cmp(&b.year))
        });
        Ok(calendars)
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns every loaded calendar, sorted by jurisdiction and year.
    pub fn calendars(&self) -> &[HolidayCalendar] {
        &self.calendars
    }

    /// Gets the calendar for a jurisdiction (case-insensitive) and year.
    pub fn calendar(&self, jurisdiction: &str, year: i32) -> EngineResult<&HolidayCalendar> {
        self.calendars
            .iter()
            .find(|c| c.year == year && c.jurisdiction.eq_ignore_ascii_case(jurisdiction))
            .ok_or_else(|| EngineError::HolidayCalendarNotFound {
                jurisdiction: jurisdiction.to_string(),
                year,
            })
    }

    /// Builds the holiday set covering every year touched by `[start, end]`.
    ///
    /// A range crossing New Year merges the calendars of both years. Every
    /// year in the range must have a calendar. A reversed range touches no
    /// days and yields an empty set without any lookup, leaving the date-order
    /// rule to reject it.
    pub fn holiday_set(
        &self,
        jurisdiction: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<HolidaySet> {
        let mut set = HolidaySet::new();
        if start > end {
            return Ok(set);
        }

        for year in start.year()..=end.year() {
            set = set.union(&self.calendar(jurisdiction, year)?.to_set());
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::RoleMatching;
    use crate::models::Holiday;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config"
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar(jurisdiction: &str, year: i32, dates: &[NaiveDate]) -> HolidayCalendar {
        HolidayCalendar {
            jurisdiction: jurisdiction.to_string(),
            year,
            version: format!("{}.1", year),
            holidays: dates
                .iter()
                .map(|d| Holiday {
                    date: *d,
                    name: String::new(),
                })
                .collect(),
        }
    }

    /// Creates a scratch config directory under the system temp dir.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "vacation-engine-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("holidays")).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_settings_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let settings = loader.settings();
        assert_eq!(settings.default_jurisdiction, "PT");
        assert_eq!(settings.role_matching, RoleMatching::Exact);
        assert!(settings.allow_past_cancellation);
    }

    #[test]
    fn test_portugal_2026_calendar() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let calendar = loader.calendar("pt", 2026).unwrap();
        assert_eq!(calendar.holidays.len(), 13);

        let set = calendar.to_set();
        assert!(set.contains(date(2026, 1, 1)));
        assert!(set.contains(date(2026, 4, 25)));
        assert!(set.contains(date(2026, 12, 25)));
        assert!(!set.contains(date(2026, 1, 5)));
    }

    #[test]
    fn test_missing_calendar_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let err = loader.calendar("PT", 1999).unwrap_err();
        assert_eq!(
            err,
            EngineError::HolidayCalendarNotFound {
                jurisdiction: "PT".to_string(),
                year: 1999,
            }
        );
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_holiday_set_spanning_new_year_merges_calendars() {
        let loader = ConfigLoader::from_parts(
            EngineSettings::default(),
            vec![
                calendar("PT", 2026, &[date(2026, 12, 25)]),
                calendar("PT", 2027, &[date(2027, 1, 1)]),
            ],
        )
        .unwrap();

        let set = loader
            .holiday_set("PT", date(2026, 12, 28), date(2027, 1, 8))
            .unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(date(2027, 1, 1)));
    }

    #[test]
    fn test_holiday_set_requires_every_year() {
        let loader = ConfigLoader::from_parts(
            EngineSettings::default(),
            vec![calendar("PT", 2026, &[date(2026, 12, 25)])],
        )
        .unwrap();

        let err = loader
            .holiday_set("PT", date(2026, 12, 28), date(2027, 1, 8))
            .unwrap_err();
        assert_eq!(err.code(), "HOLIDAY_CALENDAR_NOT_FOUND");
    }

    #[test]
    fn test_holiday_set_for_reversed_range_is_empty() {
        let loader = ConfigLoader::from_parts(
            EngineSettings::default(),
            vec![calendar("PT", 2026, &[date(2026, 1, 1)])],
        )
        .unwrap();

        let set = loader
            .holiday_set("PT", date(2026, 1, 9), date(2026, 1, 5))
            .unwrap();
        assert!(set.is_empty());

        // 2027 has no calendar; a reversed range must not look it up
        let set = loader
            .holiday_set("PT", date(2027, 1, 5), date(2026, 1, 5))
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_misplaced_holiday_is_rejected() {
        let err = ConfigLoader::from_parts(
            EngineSettings::default(),
            vec![calendar("PT", 2026, &[date(2027, 1, 1)])],
        )
        .unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_duplicate_calendar_is_rejected() {
        let err = ConfigLoader::from_parts(
            EngineSettings::default(),
            vec![calendar("PT", 2026, &[]), calendar("pt", 2026, &[])],
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::ConfigParseError { .. }));
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("invalid-yaml");
        fs::write(dir.join("engine.yaml"), "default_jurisdiction: [unclosed").unwrap();

        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_non_yaml_files_are_ignored() {
        let dir = scratch_dir("non-yaml");
        fs::write(dir.join("engine.yaml"), "default_jurisdiction: ES\n").unwrap();
        fs::write(dir.join("holidays").join("README.txt"), "not a calendar").unwrap();
        fs::write(
            dir.join("holidays").join("es-2026.yml"),
            "jurisdiction: ES\nyear: 2026\nversion: \"1\"\nholidays:\n  - date: 2026-10-12\n    name: Fiesta Nacional\n",
        )
        .unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.calendars().len(), 1);
        assert_eq!(loader.settings().default_jurisdiction, "ES");
        let _ = fs::remove_dir_all(&dir);
    }
}
