//! Serde helpers for Axiom's wire formats.
//!
//! Responsibilities:
//! - Parse and render the short duration literals used by the API (`"90s"`,
//!   `"5m"`, `"2h"`, `"1d"`, or the bare `"0"`).
//! - Render timestamps as ISO-8601 with a trailing `Z`; parsing accepts any
//!   valid offset.
//!
//! Explicitly does NOT handle:
//! - Field-name case normalization (see [`crate::decode`]).
//! - Validating higher-level semantics (ranges, required/optional rules).
//!
//! Invariants / assumptions:
//! - Duration literals always render in seconds, whatever unit they were
//!   parsed from; the API accepts any unit.
//! - Multi-digit counts are accepted even though some historical senders
//!   only ever produced a single digit.

use std::time::Duration;

use crate::error::{Error, Result};

/// Parse a duration literal of the form `<integer><unit>` with unit one of
/// `s`, `m`, `h`, `d`, or the bare literal `"0"`.
pub fn parse_duration_literal(value: &str) -> Result<Duration> {
    if value == "0" {
        return Ok(Duration::ZERO);
    }

    let (count, unit) = value.split_at(value.len().saturating_sub(1));
    let count: u64 = count
        .parse()
        .map_err(|_| Error::InvalidDurationLiteral(value.to_string()))?;

    let secs_per_unit = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86400,
        _ => return Err(Error::InvalidDurationLiteral(value.to_string())),
    };

    Ok(Duration::from_secs(count * secs_per_unit))
}

/// Render a duration as the literal form the API expects: total seconds with
/// an `s` suffix (`"90s"`).
pub fn format_duration_literal(duration: Duration) -> String {
    format!("{}s", duration.as_secs())
}

/// Module for serializing `DateTime<Utc>` fields as ISO-8601 with a trailing
/// `Z`. Parsing accepts any valid offset and converts to UTC.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

/// Like [`timestamp`], for optional fields. Pair with
/// `#[serde(default, skip_serializing_if = "Option::is_none")]`.
pub mod opt_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<DateTime<Utc>>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    #[test]
    fn test_parse_duration_literal_units() {
        assert_eq!(parse_duration_literal("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration_literal("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration_literal("3h").unwrap(), Duration::from_secs(10800));
        assert_eq!(parse_duration_literal("1d").unwrap(), Duration::from_secs(86400));
    }

    #[test]
    fn test_parse_duration_literal_zero() {
        assert_eq!(parse_duration_literal("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_duration_literal_multi_digit() {
        assert_eq!(parse_duration_literal("90s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration_literal("15m").unwrap(), Duration::from_secs(900));
    }

    #[test]
    fn test_parse_duration_literal_rejects_garbage() {
        assert!(parse_duration_literal("").is_err());
        assert!(parse_duration_literal("s").is_err());
        assert!(parse_duration_literal("5w").is_err());
        assert!(parse_duration_literal("-5s").is_err());
        assert!(parse_duration_literal("5.5s").is_err());
    }

    #[test]
    fn test_format_duration_literal_renders_seconds() {
        assert_eq!(format_duration_literal(Duration::from_secs(60)), "60s");
        assert_eq!(format_duration_literal(Duration::ZERO), "0s");
    }

    #[test]
    fn test_duration_literal_round_trip() {
        let d = Duration::from_secs(300);
        let rendered = format_duration_literal(d);
        assert_eq!(parse_duration_literal(&rendered).unwrap(), d);
    }

    #[derive(Serialize, Deserialize)]
    struct StampWrapper {
        #[serde(with = "timestamp")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_timestamp_serializes_with_trailing_z() {
        let wrapper = StampWrapper {
            at: "2024-02-06T11:39:28Z".parse().unwrap(),
        };
        let json = serde_json::to_string(&wrapper).unwrap();
        assert_eq!(json, r#"{"at":"2024-02-06T11:39:28Z"}"#);
    }

    #[test]
    fn test_timestamp_parse_accepts_offsets() {
        let wrapper: StampWrapper =
            serde_json::from_str(r#"{"at":"2024-02-06T13:39:28+02:00"}"#).unwrap();
        let expected: DateTime<Utc> = "2024-02-06T11:39:28Z".parse().unwrap();
        assert_eq!(wrapper.at, expected);
    }
}
