use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::time::{Iso8601Validator, TimestampValidator};

pub type OrbitId = u32;
pub type ObjectId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Orbit {
    pub id: OrbitId,
    pub name: String,
    /// (160, 40000] km above the base radius
    pub altitude_km: f64,
    pub inclination_deg: f64,
    pub raan_deg: f64,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OperationalState {
    Active,
    Inactive,
    Deorbited,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrackedObject {
    pub id: ObjectId,
    pub name: String,
    pub operator: String,
    /// Simulation epoch of the object; no position exists before it.
    #[serde(deserialize_with = "deserialize_instant")]
    pub introduced_at: DateTime<Utc>,
    #[serde(default = "default_state")]
    pub state: OperationalState,
    pub starting_longitude_deg: f64,
    pub orbit_id: OrbitId,
}

impl TrackedObject {
    pub fn is_active(&self) -> bool {
        self.state == OperationalState::Active
    }
}

fn default_state() -> OperationalState {
    OperationalState::Active
}

/// A tracked object joined with the orbit it references.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub object: TrackedObject,
    pub orbit: Orbit,
}

fn deserialize_instant<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Iso8601Validator
        .validate_timestamp(&s)
        .map_err(serde::de::Error::custom)
}
