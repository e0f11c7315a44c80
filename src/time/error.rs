use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeError {
    #[error("Invalid time format: {literal}. Expected ISO 8601 (e.g. '2024-01-15T10:30:00Z'): {reason}")]
    InvalidTimestamp { literal: String, reason: String },
    #[error("Invalid precision format: {literal}: {reason}")]
    InvalidPrecision { literal: String, reason: String },
    #[error("time step must be positive")]
    NonPositiveStep,
    #[error("instant is outside the representable time range")]
    OutOfRange,
}
