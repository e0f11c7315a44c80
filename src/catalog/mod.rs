mod error;
mod storage;
mod types;

pub use error::CatalogError;
pub use storage::MemoryCatalog;
pub use types::{CatalogEntry, ObjectId, OperationalState, Orbit, OrbitId, TrackedObject};

/// Read access to orbits and tracked objects. Objects reference their orbit
/// by id only; joining goes through [Catalog::orbit].
pub trait Catalog {
    fn orbit(&self, id: OrbitId) -> Result<Orbit, CatalogError>;

    fn orbits(&self) -> Vec<Orbit>;

    fn object(&self, id: ObjectId) -> Result<TrackedObject, CatalogError>;

    fn objects(&self) -> Vec<TrackedObject>;

    fn objects_in_state(&self, state: OperationalState) -> Vec<TrackedObject> {
        self.objects()
            .into_iter()
            .filter(|object| object.state == state)
            .collect()
    }

    /// Object `id` together with the orbit it references.
    fn entry(&self, id: ObjectId) -> Result<CatalogEntry, CatalogError> {
        let object = self.object(id)?;
        self.join(object)
    }

    fn join(&self, object: TrackedObject) -> Result<CatalogEntry, CatalogError> {
        let orbit = self.orbit(object.orbit_id).map_err(|e| match e {
            CatalogError::OrbitNotFound(orbit) => CatalogError::MissingOrbit {
                object: object.id,
                orbit,
            },
            other => other,
        })?;
        Ok(CatalogEntry { object, orbit })
    }
}
