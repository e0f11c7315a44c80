use std::f64::consts::TAU;

use super::{PropagationError, Propagator};
use crate::geometry::{
    normalize_longitude, GeodeticCoordinates, OrbitalParameters, EARTH_BASE_RADIUS_KM,
    NUMERICAL_EPSILON,
};

/// Circular two-body propagation: constant angular rate along a circle of
/// radius `a`, no perturbations.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeplerianPropagator;

impl KeplerianPropagator {
    pub fn new() -> Self {
        log::debug!("Initialized propagator: Keplerian circular");
        Self
    }

    /// ν = (ω·t + λ₀) mod 2π
    pub fn true_anomaly_rad(
        &self,
        params: &OrbitalParameters,
        elapsed_s: f64,
        initial_longitude_deg: f64,
    ) -> Result<f64, PropagationError> {
        if elapsed_s.is_nan() || elapsed_s < 0.0 {
            return Err(PropagationError::NegativeElapsed { seconds: elapsed_s });
        }

        let omega = params.angular_velocity_rad_s();
        if omega.abs() < NUMERICAL_EPSILON {
            return Err(PropagationError::DegenerateOrbit {
                angular_velocity_rad_s: omega,
            });
        }

        Ok((omega * elapsed_s + initial_longitude_deg.to_radians()).rem_euclid(TAU))
    }
}

impl Propagator for KeplerianPropagator {
    fn propagate(
        &self,
        params: &OrbitalParameters,
        elapsed_s: f64,
        initial_longitude_deg: f64,
    ) -> Result<GeodeticCoordinates, PropagationError> {
        let nu = self.true_anomaly_rad(params, elapsed_s, initial_longitude_deg)?;
        let inclination = params.inclination_deg.to_radians();
        let raan = params.raan_deg.to_radians();

        let latitude = (inclination.sin() * nu.sin()).asin();
        let longitude = (inclination.cos() * nu.sin()).atan2(nu.cos()) + raan;

        Ok(GeodeticCoordinates::new(
            latitude.to_degrees(),
            normalize_longitude(longitude.to_degrees()),
            params.semi_major_axis_km - EARTH_BASE_RADIUS_KM,
        ))
    }
}
