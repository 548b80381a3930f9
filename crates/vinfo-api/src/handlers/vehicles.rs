//! Vehicle handlers
//!
//! `GET /vehicles` lists the caller's vehicles and reads the requested
//! properties from the first one; `GET /vehicle` reads them from a named
//! vehicle. The `DELETE` variants disconnect one or all vehicles.

use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::{debug, warn};
use vinfo_core::VehicleInfo;
use vinfo_engine::{CommandOutcome, VehicleListing};

use super::{parse_property_list, parse_unit_system, require_vehicle_id};
use crate::auth::AccessToken;
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Query Parameters
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclesQuery {
    /// `.`-delimited property names
    pub vehicle_properties: Option<String>,
    /// `imperial` (default) or `metric`
    pub unit_system: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQuery {
    pub vehicle_id: Option<String>,
    /// Needed for brand-specific properties
    pub make: Option<String>,
    pub vehicle_properties: Option<String>,
    pub unit_system: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /vehicles
pub async fn list_vehicles(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<VehiclesQuery>,
) -> Result<Json<VehicleListing>, ApiError> {
    let properties = parse_property_list(query.vehicle_properties.as_deref());
    let unit_system = parse_unit_system(query.unit_system.as_deref(), state.default_unit_system())?;
    debug!(?properties, %unit_system, "Listing vehicles");

    let listing = state
        .service()
        .list_vehicles(state.provider(), &token.0, &properties, unit_system)
        .await?;

    Ok(Json(listing))
}

/// GET /vehicle
pub async fn get_vehicle(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<VehicleQuery>,
) -> Result<Json<VehicleInfo>, ApiError> {
    let vehicle_id = require_vehicle_id(query.vehicle_id.as_deref())?;
    let properties = parse_property_list(query.vehicle_properties.as_deref());
    let unit_system = parse_unit_system(query.unit_system.as_deref(), state.default_unit_system())?;
    let make = query.make.as_deref().map(str::trim).filter(|m| !m.is_empty());

    let connection = state.provider().connect(vehicle_id, &token.0, unit_system);
    let info = state
        .service()
        .vehicle_info(connection.as_ref(), make, &properties)
        .await?;

    Ok(Json(info))
}

/// DELETE /vehicle
pub async fn disconnect_vehicle(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<VehicleQuery>,
) -> Result<Json<CommandOutcome>, ApiError> {
    let vehicle_id = require_vehicle_id(query.vehicle_id.as_deref())?;

    let connection = state
        .provider()
        .connect(vehicle_id, &token.0, state.default_unit_system());
    state.service().disconnect(connection.as_ref()).await?;

    Ok(Json(CommandOutcome {
        message: "Successfully disconnected vehicle".to_string(),
    }))
}

/// DELETE /vehicles
pub async fn disconnect_all(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> Result<Json<CommandOutcome>, ApiError> {
    let report = state
        .service()
        .disconnect_all(state.provider(), &token.0, state.default_unit_system())
        .await?;

    if !report.is_complete() {
        let failed: Vec<&str> = report.failed.iter().map(|f| f.id.as_str()).collect();
        warn!(?failed, "Some vehicles were not disconnected");
        return Err(ApiError::BadGateway(format!(
            "Failed to disconnect one or more vehicles: {}",
            failed.join(", ")
        )));
    }

    Ok(Json(CommandOutcome {
        message: "Successfully disconnected all vehicles".to_string(),
    }))
}
