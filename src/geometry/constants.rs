/// Earth's standard gravitational parameter [km³/s²]
pub const EARTH_GRAV_PARAMETER_KM3_S2: f64 = 398_600.441_8;
/// Mean spherical Earth radius used for every altitude conversion [km]
pub const EARTH_BASE_RADIUS_KM: f64 = 6371.0;
/// Default separation below which two objects count as a proximity event [km]
pub const PROXIMITY_THRESHOLD_KM: f64 = 0.01;
pub const NUMERICAL_EPSILON: f64 = 1e-9;

pub const MIN_ORBIT_ALTITUDE_KM: f64 = 160.0;
pub const MAX_ORBIT_ALTITUDE_KM: f64 = 40_000.0;
