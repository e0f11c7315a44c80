mod error;
mod keplerian;
mod position;

pub use error::{LookupError, PropagationError};
pub use keplerian::KeplerianPropagator;
pub use position::PositionService;

use crate::geometry::{GeodeticCoordinates, OrbitalParameters};

/// Maps orbital parameters and elapsed time since the epoch to a position.
pub trait Propagator {
    fn propagate(
        &self,
        params: &OrbitalParameters,
        elapsed_s: f64,
        initial_longitude_deg: f64,
    ) -> Result<GeodeticCoordinates, PropagationError>;
}
