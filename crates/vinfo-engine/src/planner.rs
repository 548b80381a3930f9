//! Request planner - turns requested properties into a deduplicated request list

use tracing::debug;
use vinfo_core::Endpoint;
use vinfo_props::{PropertyRegistry, PropsResult};

/// Plan the requests needed to read `requested` from a vehicle of `make`.
///
/// Properties not supported for `make` are skipped. Endpoints shared by
/// several properties appear once, in first-seen order.
pub fn plan<S: AsRef<str>>(
    registry: &PropertyRegistry,
    requested: &[S],
    make: Option<&str>,
) -> PropsResult<Vec<Endpoint>> {
    let mut endpoints: Vec<Endpoint> = Vec::with_capacity(requested.len());

    for name in requested {
        let name = name.as_ref();
        let Some(endpoint) = registry.lookup(name)?.resolve(make)? else {
            debug!(property = %name, make = ?make, "Property not supported for make, skipping");
            continue;
        };
        if !endpoints.contains(&endpoint) {
            endpoints.push(endpoint);
        }
    }

    Ok(endpoints)
}
