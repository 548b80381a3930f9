//! VehicleInfoService - the entry points callers use

use std::sync::Arc;

use serde::{Serialize, Serializer};
use tracing::{debug, info, instrument};
use vinfo_core::{
    ConnectionProvider, UnitSystem, VehicleAttributes, VehicleConnection, VehicleInfo,
};
use vinfo_props::PropertyRegistry;

use crate::aggregator::aggregate_attributes;
use crate::error::EngineResult;
use crate::executor::BatchExecutor;
use crate::planner::plan;
use crate::reconciler::reconcile;

/// Result of listing a caller's vehicles
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListing {
    /// One entry per vehicle, in the order the API listed them
    pub vehicles: Vec<VehicleAttributes>,
    /// Info for the first vehicle whose attributes resolved; `{}` when none did
    #[serde(serialize_with = "empty_object_if_none")]
    pub selected_vehicle: Option<VehicleInfo>,
}

fn empty_object_if_none<S: Serializer>(
    info: &Option<VehicleInfo>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match info {
        Some(info) => info.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

/// Plans, executes and reconciles vehicle-info requests
#[derive(Debug, Clone)]
pub struct VehicleInfoService {
    registry: Arc<PropertyRegistry>,
    executor: BatchExecutor,
}

impl VehicleInfoService {
    /// Create a service over a registry
    pub fn new(registry: Arc<PropertyRegistry>) -> Self {
        Self {
            registry,
            executor: BatchExecutor::new(),
        }
    }

    /// Replace the batch executor
    pub fn with_executor(mut self, executor: BatchExecutor) -> Self {
        self.executor = executor;
        self
    }

    /// Property registry used by this service
    pub fn registry(&self) -> &Arc<PropertyRegistry> {
        &self.registry
    }

    /// Read `requested` properties from one vehicle.
    ///
    /// Fails only for caller errors (unknown property, brand-specific
    /// property without a make). Every request failure is reported inside
    /// the returned info.
    #[instrument(skip_all, fields(vehicle_id = %connection.vehicle_id(), make = ?make))]
    pub async fn vehicle_info<S: AsRef<str>>(
        &self,
        connection: &dyn VehicleConnection,
        make: Option<&str>,
        requested: &[S],
    ) -> EngineResult<VehicleInfo> {
        let endpoints = plan(&self.registry, requested, make)?;
        debug!(requests = endpoints.len(), "Planned batch");

        let batch = self.executor.execute(&endpoints, connection).await;
        let info = reconcile(
            &self.registry,
            requested,
            connection.vehicle_id(),
            make,
            &batch,
        )?;
        debug!(
            properties = info.len(),
            failures = batch.failure_count(),
            "Reconciled vehicle info"
        );
        Ok(info)
    }

    /// List the caller's vehicles with their attributes, plus full info for
    /// the first vehicle that resolved
    #[instrument(skip_all, fields(unit_system = %unit_system))]
    pub async fn list_vehicles<S: AsRef<str>>(
        &self,
        provider: &dyn ConnectionProvider,
        access_token: &str,
        requested: &[S],
        unit_system: UnitSystem,
    ) -> EngineResult<VehicleListing> {
        for name in requested {
            self.registry.lookup(name.as_ref())?;
        }

        let ids = provider.list_vehicles(access_token).await?;
        info!(count = ids.len(), "Listed vehicles");

        let connections: Vec<Arc<dyn VehicleConnection>> = ids
            .iter()
            .map(|id| provider.connect(id, access_token, unit_system))
            .collect();
        let vehicles = aggregate_attributes(&connections).await;

        let selected = vehicles
            .iter()
            .zip(&connections)
            .find_map(|(entry, connection)| match entry {
                VehicleAttributes::Resolved(attrs) => Some((attrs.make.clone(), connection)),
                VehicleAttributes::Failed { .. } => None,
            });

        let selected_vehicle = match selected {
            Some((make, connection)) => Some(
                self.vehicle_info(connection.as_ref(), Some(&make), requested)
                    .await?,
            ),
            None => None,
        };

        Ok(VehicleListing {
            vehicles,
            selected_vehicle,
        })
    }
}
