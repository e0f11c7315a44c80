use serde::Serialize;
use utoipa::ToSchema;

use super::constants::EARTH_BASE_RADIUS_KM;

/// Position of an object over a spherical Earth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GeodeticCoordinates {
    /// [-90, 90]
    pub latitude_deg: f64,
    /// [-180, 180)
    pub longitude_deg: f64,
    /// Height above the base radius
    pub altitude_km: f64,
}

impl GeodeticCoordinates {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_km: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_km,
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    /// Geocentric cartesian position. Only used for straight-line distances,
    /// so the sphere is not rotated into any inertial frame.
    pub fn to_cartesian_km(&self) -> [f64; 3] {
        let radius = EARTH_BASE_RADIUS_KM + self.altitude_km;
        let lat = self.lat_rad();
        let lon = self.lon_rad();
        let cos_lat = lat.cos();
        [
            radius * cos_lat * lon.cos(),
            radius * cos_lat * lon.sin(),
            radius * lat.sin(),
        ]
    }

    pub fn distance_km(&self, other: &GeodeticCoordinates) -> f64 {
        let a = self.to_cartesian_km();
        let b = other.to_cartesian_km();
        let dr = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt()
    }
}

/// Wraps a longitude into [-180, 180).
pub fn normalize_longitude(longitude_deg: f64) -> f64 {
    let wrapped = (longitude_deg + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid may round up to exactly 360 for tiny negative inputs
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
