
use chrono::{DateTime, TimeZone, Utc};
use log::LevelFilter;
use rstest::fixture;
use std::sync::Once;

use crate::catalog::MemoryCatalog;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// 2024-01-01T00:00:00Z, the epoch of every object in [CATALOG].
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// A twin pair sharing an equatorial 500 km orbit, one polar object far
/// from both, one decommissioned object and one introduced a day late.
pub const CATALOG: &str = r#"
orbits:
  - id: 1
    name: EQ-500
    altitude_km: 500
    inclination_deg: 0
    raan_deg: 0
  - id: 2
    name: POLAR-800
    altitude_km: 800
    inclination_deg: 90
    raan_deg: 45
objects:
  - id: 1
    name: TWIN-A
    operator: Orbital Ops
    introduced_at: 2024-01-01T00:00:00Z
    starting_longitude_deg: 0.0
    orbit_id: 1
  - id: 2
    name: TWIN-B
    operator: Orbital Ops
    introduced_at: 2024-01-01T00:00:00Z
    starting_longitude_deg: 0.00001
    orbit_id: 1
  - id: 3
    name: SENTINEL
    operator: Polar Watch
    introduced_at: 2024-01-01T00:00:00Z
    starting_longitude_deg: 120.0
    orbit_id: 2
  - id: 4
    name: RETIRED
    operator: Polar Watch
    introduced_at: 2023-06-01T00:00:00Z
    state: inactive
    starting_longitude_deg: 0.000005
    orbit_id: 1
  - id: 5
    name: LATECOMER
    operator: orbital ops
    introduced_at: 2024-01-02T00:00:00Z
    starting_longitude_deg: 0.0
    orbit_id: 1
"#;

#[fixture]
pub fn catalog() -> MemoryCatalog {
    init_logger();
    MemoryCatalog::from_yaml(CATALOG).unwrap()
}
