mod error;
mod grid;
mod precision;
mod timestamp;

pub use error::TimeError;
pub use grid::{round_to_grid, TimeGrid};
pub use precision::{Precision, PrecisionUnit};
pub use timestamp::{format_utc, Iso8601Validator, TimestampValidator};
