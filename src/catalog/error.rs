use thiserror::Error;

use super::{ObjectId, OrbitId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Orbit with ID {0} does not exist")]
    OrbitNotFound(OrbitId),
    #[error("Object with ID {0} does not exist")]
    ObjectNotFound(ObjectId),
    #[error("Orbit {orbit} of object {object} does not exist")]
    MissingOrbit { object: ObjectId, orbit: OrbitId },
    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },
    #[error("Duplicate {kind} name {name:?}")]
    DuplicateName { kind: &'static str, name: String },
    #[error("Invalid {record}: {reason}")]
    InvalidRecord { record: String, reason: String },
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::OrbitNotFound(_)
                | CatalogError::ObjectNotFound(_)
                | CatalogError::MissingOrbit { .. }
        )
    }
}
