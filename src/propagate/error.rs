use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropagationError {
    #[error("Degenerate orbit: angular velocity {angular_velocity_rad_s} rad/s is too low")]
    DegenerateOrbit { angular_velocity_rad_s: f64 },
    #[error("Calculation moment is {seconds} s before the object's epoch")]
    NegativeElapsed { seconds: f64 },
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{0}")]
    Catalog(#[from] CatalogError),
    #[error("propagation error: {0}")]
    Propagation(#[from] PropagationError),
}
