mod constants;
mod coordinates;
mod orbital;

pub use constants::*;
pub use coordinates::{normalize_longitude, GeodeticCoordinates};
pub use orbital::OrbitalParameters;
