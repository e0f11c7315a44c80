use std::f64::consts::TAU;

use crate::catalog::Orbit;

use super::constants::{EARTH_BASE_RADIUS_KM, EARTH_GRAV_PARAMETER_KM3_S2, NUMERICAL_EPSILON};

/// Circular-orbit parameters derived from a catalog [Orbit] for one computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalParameters {
    /// Earth base radius + altitude [km]
    pub semi_major_axis_km: f64,
    /// [0, 180]
    pub inclination_deg: f64,
    /// Right ascension of the ascending node, [0, 360)
    pub raan_deg: f64,
}

impl OrbitalParameters {
    pub fn new(semi_major_axis_km: f64, inclination_deg: f64, raan_deg: f64) -> Self {
        Self {
            semi_major_axis_km,
            inclination_deg,
            raan_deg,
        }
    }

    pub fn from_orbit(orbit: &Orbit) -> Self {
        Self::new(
            EARTH_BASE_RADIUS_KM + orbit.altitude_km,
            orbit.inclination_deg,
            orbit.raan_deg,
        )
    }

    /// T = 2π·√(a³/μ) [s]
    pub fn period_s(&self) -> f64 {
        TAU * (self.semi_major_axis_km.powi(3) / EARTH_GRAV_PARAMETER_KM3_S2).sqrt()
    }

    /// ω = 2π/T [rad/s]. Collapses to 0 when the period is not usable, so
    /// callers only have to check one quantity for degeneracy.
    pub fn angular_velocity_rad_s(&self) -> f64 {
        let period = self.period_s();
        if period.is_finite() && period > NUMERICAL_EPSILON {
            TAU / period
        } else {
            0.0
        }
    }
}
