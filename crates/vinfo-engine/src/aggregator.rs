//! Vehicle list aggregator - concurrent per-vehicle calls, failures kept per entry

use std::sync::Arc;

use futures::future::join_all;
use tracing::warn;
use vinfo_core::{ConnectionResult, VehicleAttributes, VehicleConnection};

/// Fetch attributes for every connection concurrently.
///
/// Returns one entry per connection in the same order. A failed fetch
/// becomes an error entry for that vehicle only.
pub async fn aggregate_attributes(
    connections: &[Arc<dyn VehicleConnection>],
) -> Vec<VehicleAttributes> {
    let fetches = connections.iter().map(|connection| async move {
        match connection.attributes().await {
            Ok(attributes) => VehicleAttributes::Resolved(attributes),
            Err(e) => {
                warn!(vehicle_id = %connection.vehicle_id(), error = %e, "Failed to get vehicle attributes");
                VehicleAttributes::Failed {
                    id: connection.vehicle_id().to_string(),
                    error: e.into_typed(),
                }
            }
        }
    });

    join_all(fetches).await
}

/// Disconnect every connection concurrently.
///
/// Returns `(vehicle id, outcome)` per connection in the same order; one
/// failed disconnect does not stop the others.
pub async fn disconnect_each(
    connections: &[Arc<dyn VehicleConnection>],
) -> Vec<(String, ConnectionResult<()>)> {
    let calls = connections.iter().map(|connection| async move {
        let result = connection.disconnect().await;
        if let Err(e) = &result {
            warn!(vehicle_id = %connection.vehicle_id(), error = %e, "Failed to disconnect vehicle");
        }
        (connection.vehicle_id().to_string(), result)
    });

    join_all(calls).await
}
