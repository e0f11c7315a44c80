use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::ObjectId;
use crate::geometry::GeodeticCoordinates;

/// Two objects closer than the detection threshold at one grid instant.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProximityEvent {
    /// Always the lower of the two ids
    pub object_a: ObjectId,
    pub object_b: ObjectId,
    pub at: DateTime<Utc>,
    /// Position of `object_a`
    pub location: GeodeticCoordinates,
    pub distance_km: f64,
}

/// Orders events by `(instant, object_a, object_b)`.
pub fn sort_events(events: &mut [ProximityEvent]) {
    events.sort_by_key(|e| (e.at, e.object_a, e.object_b));
}
