use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;

use super::TimeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum PrecisionUnit {
    #[strum(serialize = "ms")]
    Milliseconds,
    #[strum(serialize = "s")]
    Seconds,
    #[strum(serialize = "m")]
    Minutes,
    #[strum(serialize = "h")]
    Hours,
    #[strum(serialize = "d")]
    Days,
}

impl PrecisionUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "ms" => Some(Self::Milliseconds),
            "s" => Some(Self::Seconds),
            "m" => Some(Self::Minutes),
            "h" => Some(Self::Hours),
            "d" => Some(Self::Days),
            _ => None,
        }
    }
}

/// Grid step of a proximity scan, written `<int><unit>` (`5s`, `2h`, `250ms`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    pub value: i64,
    pub unit: PrecisionUnit,
}

impl Precision {
    pub fn step(&self) -> TimeDelta {
        // Bounds are checked when parsing, so these cannot overflow here.
        match self.unit {
            PrecisionUnit::Milliseconds => TimeDelta::milliseconds(self.value),
            PrecisionUnit::Seconds => TimeDelta::seconds(self.value),
            PrecisionUnit::Minutes => TimeDelta::minutes(self.value),
            PrecisionUnit::Hours => TimeDelta::hours(self.value),
            PrecisionUnit::Days => TimeDelta::days(self.value),
        }
    }
}

impl FromStr for Precision {
    type Err = TimeError;

    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| TimeError::InvalidPrecision {
            literal: literal.to_string(),
            reason: reason.to_string(),
        };

        let split = literal
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| err("missing unit (expected ms, s, m, h or d)"))?;
        let (digits, suffix) = literal.split_at(split);
        if digits.is_empty() {
            return Err(err("expected an integer value before the unit"));
        }

        let unit = PrecisionUnit::from_suffix(suffix)
            .ok_or_else(|| err("unknown unit (expected ms, s, m, h or d)"))?;
        let value: i64 = digits.parse().map_err(|_| err("value is too large"))?;
        if value < 1 {
            return Err(err("value must be >= 1"));
        }

        let in_range = match unit {
            PrecisionUnit::Milliseconds => TimeDelta::try_milliseconds(value),
            PrecisionUnit::Seconds => TimeDelta::try_seconds(value),
            PrecisionUnit::Minutes => TimeDelta::try_minutes(value),
            PrecisionUnit::Hours => TimeDelta::try_hours(value),
            PrecisionUnit::Days => TimeDelta::try_days(value),
        };
        if in_range.is_none() {
            return Err(err("value is too large"));
        }

        Ok(Precision { value, unit })
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}
