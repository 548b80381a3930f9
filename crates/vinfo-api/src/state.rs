//! Application state for the vehicle-info API

use std::sync::Arc;

use vinfo_core::{ConnectionProvider, UnitSystem};
use vinfo_engine::VehicleInfoService;
use vinfo_props::PropertyRegistry;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service: Arc<VehicleInfoService>,
    provider: Arc<dyn ConnectionProvider>,
    default_unit_system: UnitSystem,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service: VehicleInfoService, provider: Arc<dyn ConnectionProvider>) -> Self {
        Self {
            service: Arc::new(service),
            provider,
            default_unit_system: UnitSystem::default(),
        }
    }

    /// Set the unit system used when a request does not name one
    pub fn with_default_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.default_unit_system = unit_system;
        self
    }

    /// Aggregation service
    pub fn service(&self) -> &VehicleInfoService {
        &self.service
    }

    /// Property registry
    pub fn registry(&self) -> &PropertyRegistry {
        self.service.registry()
    }

    /// Connection provider for the vehicle-data API
    pub fn provider(&self) -> &dyn ConnectionProvider {
        self.provider.as_ref()
    }

    /// Unit system used when a request does not name one
    pub fn default_unit_system(&self) -> UnitSystem {
        self.default_unit_system
    }
}
