use chrono::{DateTime, Utc};

use super::{KeplerianPropagator, LookupError, PropagationError, Propagator};
use crate::catalog::{Catalog, ObjectId, Orbit, TrackedObject};
use crate::geometry::{GeodeticCoordinates, OrbitalParameters};

/// Positions of catalog objects, measured from each object's introduction
/// instant. Every propagator failure is returned to the caller.
#[derive(Debug, Clone, Default)]
pub struct PositionService<P = KeplerianPropagator> {
    propagator: P,
}

impl<P: Propagator> PositionService<P> {
    pub fn new(propagator: P) -> Self {
        Self { propagator }
    }

    /// `Ok(None)` when the object did not exist yet at `at`.
    pub fn position_at(
        &self,
        object: &TrackedObject,
        orbit: &Orbit,
        at: DateTime<Utc>,
    ) -> Result<Option<GeodeticCoordinates>, PropagationError> {
        if at < object.introduced_at {
            return Ok(None);
        }

        let delta = at - object.introduced_at;
        let elapsed_s = delta.num_seconds() as f64 + delta.subsec_nanos() as f64 * 1e-9;
        let params = OrbitalParameters::from_orbit(orbit);

        self.propagator
            .propagate(&params, elapsed_s, object.starting_longitude_deg)
            .map(Some)
    }

    /// Resolves `object_id` and its orbit through the catalog first.
    pub fn lookup<C: Catalog + ?Sized>(
        &self,
        catalog: &C,
        object_id: ObjectId,
        at: DateTime<Utc>,
    ) -> Result<Option<GeodeticCoordinates>, LookupError> {
        let entry = catalog.entry(object_id)?;
        Ok(self.position_at(&entry.object, &entry.orbit, at)?)
    }
}
