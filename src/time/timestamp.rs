use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::TimeError;

const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Turns a user supplied literal into a UTC instant.
pub trait TimestampValidator {
    fn validate_timestamp(&self, literal: &str) -> Result<DateTime<Utc>, TimeError>;
}

/// ISO 8601 date-times. A literal without an offset is read as UTC, never as
/// local time, so the same literal always maps to the same instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iso8601Validator;

impl TimestampValidator for Iso8601Validator {
    fn validate_timestamp(&self, literal: &str) -> Result<DateTime<Utc>, TimeError> {
        let rfc3339_err = match DateTime::parse_from_rfc3339(literal) {
            Ok(dt) => return Ok(dt.with_timezone(&Utc)),
            Err(e) => e,
        };

        let with_offset = match literal.strip_suffix(['Z', 'z']) {
            Some(rest) => format!("{rest}+00:00"),
            None => literal.to_string(),
        };
        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&with_offset, fmt) {
                return Ok(dt.with_timezone(&Utc));
            }
        }

        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(literal, fmt) {
                return Ok(Utc.from_utc_datetime(&naive));
            }
        }

        if let Some(midnight) = NaiveDate::parse_from_str(literal, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Ok(Utc.from_utc_datetime(&midnight));
        }

        Err(TimeError::InvalidTimestamp {
            literal: literal.to_string(),
            reason: rfc3339_err.to_string(),
        })
    }
}

/// Output form for instants: second resolution, literal `Z` suffix.
pub fn format_utc(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
