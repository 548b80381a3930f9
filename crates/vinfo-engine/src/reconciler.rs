//! Settlement reconciler - maps settled requests back onto requested properties

use tracing::debug;
use vinfo_core::{BatchResult, PropertyValue, TypedError, VehicleInfo};
use vinfo_props::{PropertyRegistry, PropsResult};

/// Build the [`VehicleInfo`] for `requested` from a settled batch.
///
/// Applies the same make filtering as [`plan`](crate::planner::plan), so a
/// property skipped there is absent here. Properties that failed with a
/// `PERMISSION` error are omitted; every other failure is reported in place
/// of the value. A name requested twice keeps its first position.
pub fn reconcile<S: AsRef<str>>(
    registry: &PropertyRegistry,
    requested: &[S],
    vehicle_id: &str,
    make: Option<&str>,
    batch: &BatchResult,
) -> PropsResult<VehicleInfo> {
    let mut info = VehicleInfo::new(vehicle_id, make.map(str::to_string));

    for name in requested {
        let name = name.as_ref();
        let def = registry.lookup(name)?;
        let Some(endpoint) = def.resolve(make)? else {
            continue;
        };
        if info.contains(name) {
            continue;
        }

        let value = match batch.get(&endpoint) {
            Some(settlement) => def.extract(settlement),
            None => PropertyValue::error(TypedError::unavailable(format!(
                "No response for {}",
                endpoint
            ))),
        };

        if value.as_error().is_some_and(TypedError::is_permission) {
            debug!(vehicle_id = %vehicle_id, property = %name, "Permission not granted, omitting");
            continue;
        }
        info.insert(name, value);
    }

    Ok(info)
}
