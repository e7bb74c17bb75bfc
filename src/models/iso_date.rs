//! Strict `YYYY-MM-DD` deserialization for dates arriving from callers.
//!
//! Used with `#[serde(deserialize_with = ...)]`. Serialization keeps chrono's
//! default format, which already is `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::de::Error;
use serde::{Deserialize, Deserializer};

use crate::calculation::parse_iso_date;
use crate::error::EngineResult;

/// Deserializes one date through [`parse_iso_date`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_iso_date(&value).map_err(D::Error::custom)
}

/// Deserializes an optional list of dates through [`parse_iso_date`].
pub fn deserialize_optional_list<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer)?
        .map(|values| {
            values
                .iter()
                .map(|value| parse_iso_date(value))
                .collect::<EngineResult<Vec<_>>>()
        })
        .transpose()
        .map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Dated {
        #[serde(deserialize_with = "deserialize")]
        date: NaiveDate,
        #[serde(default, deserialize_with = "deserialize_optional_list")]
        extra: Option<Vec<NaiveDate>>,
    }

    #[test]
    fn test_accepts_padded_date() {
        let dated: Dated = serde_json::from_str(r#"{ "date": "2026-01-05" }"#).unwrap();
        assert_eq!(dated.date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert!(dated.extra.is_none());
    }

    #[test]
    fn test_rejects_unpadded_and_signed_dates() {
        for bad in ["2026-1-5", "+2026-01-05", "2026-02-30"] {
            let json = format!(r#"{{ "date": "{}" }}"#, bad);
            let err = serde_json::from_str::<Dated>(&json).unwrap_err();
            assert!(err.to_string().contains("Invalid date"), "input {bad:?}: {err}");
        }
    }

    #[test]
    fn test_list_is_checked_element_by_element() {
        let ok: Dated =
            serde_json::from_str(r#"{ "date": "2026-01-05", "extra": ["2026-01-01"] }"#).unwrap();
        assert_eq!(ok.extra.map(|dates| dates.len()), Some(1));

        let err = serde_json::from_str::<Dated>(
            r#"{ "date": "2026-01-05", "extra": ["2026-01-01", "2026-1-6"] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("2026-1-6"));
    }

    #[test]
    fn test_explicit_null_list_is_none() {
        let dated: Dated =
            serde_json::from_str(r#"{ "date": "2026-01-05", "extra": null }"#).unwrap();
        assert!(dated.extra.is_none());
    }
}
