use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError, MemoryCatalog};
use crate::propagate::{KeplerianPropagator, PositionService};
use crate::proximity::ProximityDetector;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn Catalog + Send + Sync>,
    pub positions: Arc<PositionService>,
    pub detector: Arc<ProximityDetector>,
}

impl AppState {
    pub fn new(config: Config, catalog: impl Catalog + Send + Sync + 'static) -> Self {
        let propagator = KeplerianPropagator::new();
        let detector = ProximityDetector::new(PositionService::new(propagator), config.proximity);
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            positions: Arc::new(PositionService::new(propagator)),
            detector: Arc::new(detector),
        }
    }

    pub fn from_config(config: Config) -> Result<Self, CatalogError> {
        let catalog = MemoryCatalog::from_file(&config.catalog.path)?;
        log::info!(
            "Loaded catalog {}: {} orbits, {} objects",
            config.catalog.path.display(),
            catalog.orbits().len(),
            catalog.objects().len()
        );
        Ok(Self::new(config, catalog))
    }
}
