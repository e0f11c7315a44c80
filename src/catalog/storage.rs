use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use super::{
    Catalog, CatalogError, ObjectId, Orbit, OrbitId, TrackedObject,
};
use crate::geometry::{MAX_ORBIT_ALTITUDE_KM, MIN_ORBIT_ALTITUDE_KM};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    orbits: Vec<Orbit>,
    #[serde(default)]
    objects: Vec<TrackedObject>,
}

/// Immutable catalog snapshot held in memory, typically loaded from a YAML
/// file of the form `{ orbits: [...], objects: [...] }`.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    orbits: BTreeMap<OrbitId, Orbit>,
    objects: BTreeMap<ObjectId, TrackedObject>,
}

impl MemoryCatalog {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::from_records(file.orbits, file.objects)
    }

    pub fn from_records(
        orbits: Vec<Orbit>,
        objects: Vec<TrackedObject>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = MemoryCatalog::default();

        let mut orbit_names = HashSet::new();
        for orbit in orbits {
            validate_orbit(&orbit)?;
            if !orbit_names.insert(orbit.name.clone()) {
                return Err(CatalogError::DuplicateName {
                    kind: "orbit",
                    name: orbit.name,
                });
            }
            if catalog.orbits.contains_key(&orbit.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "orbit",
                    id: orbit.id,
                });
            }
            catalog.orbits.insert(orbit.id, orbit);
        }

        let mut object_names = HashSet::new();
        for object in objects {
            validate_object(&object)?;
            if !catalog.orbits.contains_key(&object.orbit_id) {
                return Err(CatalogError::MissingOrbit {
                    object: object.id,
                    orbit: object.orbit_id,
                });
            }
            if !object_names.insert(object.name.clone()) {
                return Err(CatalogError::DuplicateName {
                    kind: "object",
                    name: object.name,
                });
            }
            if catalog.objects.contains_key(&object.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "object",
                    id: object.id,
                });
            }
            catalog.objects.insert(object.id, object);
        }

        log::debug!(
            "Catalog loaded: {} orbits, {} objects",
            catalog.orbits.len(),
            catalog.objects.len()
        );

        Ok(catalog)
    }
}

impl Catalog for MemoryCatalog {
    fn orbit(&self, id: OrbitId) -> Result<Orbit, CatalogError> {
        self.orbits
            .get(&id)
            .cloned()
            .ok_or(CatalogError::OrbitNotFound(id))
    }

    fn orbits(&self) -> Vec<Orbit> {
        self.orbits.values().cloned().collect()
    }

    fn object(&self, id: ObjectId) -> Result<TrackedObject, CatalogError> {
        self.objects
            .get(&id)
            .cloned()
            .ok_or(CatalogError::ObjectNotFound(id))
    }

    fn objects(&self) -> Vec<TrackedObject> {
        self.objects.values().cloned().collect()
    }
}

fn validate_orbit(orbit: &Orbit) -> Result<(), CatalogError> {
    let err = |reason: String| CatalogError::InvalidRecord {
        record: format!("orbit {}", orbit.id),
        reason,
    };

    if orbit.name.trim().is_empty() {
        return Err(err("name must not be empty".into()));
    }
    // (160, 40000]
    if !(orbit.altitude_km > MIN_ORBIT_ALTITUDE_KM && orbit.altitude_km <= MAX_ORBIT_ALTITUDE_KM) {
        return Err(err(format!(
            "altitude {} km outside ({}, {}]",
            orbit.altitude_km, MIN_ORBIT_ALTITUDE_KM, MAX_ORBIT_ALTITUDE_KM
        )));
    }
    if !(0.0..=180.0).contains(&orbit.inclination_deg) {
        return Err(err(format!(
            "inclination {} deg outside [0, 180]",
            orbit.inclination_deg
        )));
    }
    if !(0.0..360.0).contains(&orbit.raan_deg) {
        return Err(err(format!("RAAN {} deg outside [0, 360)", orbit.raan_deg)));
    }
    Ok(())
}

fn validate_object(object: &TrackedObject) -> Result<(), CatalogError> {
    let err = |reason: String| CatalogError::InvalidRecord {
        record: format!("object {}", object.id),
        reason,
    };

    if object.name.trim().is_empty() {
        return Err(err("name must not be empty".into()));
    }
    if object.operator.trim().is_empty() {
        return Err(err("operator must not be empty".into()));
    }
    if !(-180.0..=180.0).contains(&object.starting_longitude_deg) {
        return Err(err(format!(
            "starting longitude {} deg outside [-180, 180]",
            object.starting_longitude_deg
        )));
    }
    Ok(())
}
