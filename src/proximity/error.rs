use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::time::TimeError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProximityError {
    #[error("scan window start {start} is not before end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("proximity threshold must be a positive distance, got {threshold_km} km")]
    InvalidThreshold { threshold_km: f64 },
    #[error("scan would visit {steps} grid instants, limit is {limit}")]
    TooManySteps { steps: u64, limit: u64 },
    #[error("{0}")]
    Time(#[from] TimeError),
}
