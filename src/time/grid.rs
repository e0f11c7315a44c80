use chrono::{DateTime, TimeDelta, Utc};

use super::TimeError;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

fn to_nanos(instant: &DateTime<Utc>) -> i128 {
    instant.timestamp() as i128 * NANOS_PER_SECOND + instant.timestamp_subsec_nanos() as i128
}

fn from_nanos(nanos: i128) -> Result<DateTime<Utc>, TimeError> {
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND)).map_err(|_| TimeError::OutOfRange)?;
    let subsec = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
    DateTime::from_timestamp(secs, subsec).ok_or(TimeError::OutOfRange)
}

fn step_nanos(step: TimeDelta) -> Result<i128, TimeError> {
    match step.num_nanoseconds() {
        Some(n) if n > 0 => Ok(n as i128),
        Some(_) => Err(TimeError::NonPositiveStep),
        None => Err(TimeError::OutOfRange),
    }
}

/// Snaps an instant to the nearest multiple of `step` counted from the Unix
/// epoch. Exact half-steps round up (towards the later instant); an instant
/// already on the grid is returned unchanged.
pub fn round_to_grid(instant: DateTime<Utc>, step: TimeDelta) -> Result<DateTime<Utc>, TimeError> {
    let step = step_nanos(step)?;
    let nanos = to_nanos(&instant);
    let mut quotient = nanos.div_euclid(step);
    if 2 * nanos.rem_euclid(step) >= step {
        quotient += 1;
    }
    from_nanos(quotient * step)
}

/// Closed interval `[start, end]` sampled every `step`, with both bounds
/// snapped to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: TimeDelta,
}

impl TimeGrid {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, step: TimeDelta) -> Result<Self, TimeError> {
        Ok(Self {
            start: round_to_grid(start, step)?,
            end: round_to_grid(end, step)?,
            step,
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn step(&self) -> TimeDelta {
        self.step
    }

    /// Number of instants the grid visits.
    pub fn len(&self) -> u64 {
        let span = to_nanos(&self.end) - to_nanos(&self.start);
        if span < 0 {
            return 0;
        }
        // step was validated in new()
        let step = self.step.num_nanoseconds().unwrap_or(i64::MAX) as i128;
        u64::try_from(span / step + 1).unwrap_or(u64::MAX)
    }

    pub fn instants(&self) -> GridInstants {
        GridInstants {
            next: Some(self.start),
            end: self.end,
            step: self.step,
        }
    }
}

pub struct GridInstants {
    next: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    step: TimeDelta,
}

impl Iterator for GridInstants {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|t| *t <= self.end)?;
        self.next = current.checked_add_signed(self.step);
        Some(current)
    }
}
