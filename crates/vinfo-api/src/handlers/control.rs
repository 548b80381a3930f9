//! Vehicle command handlers
//!
//! All commands address one vehicle through `?vehicleId=`; the amperage
//! command also needs `&make=` to find the brand-specific endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use vinfo_core::{ChargeAction, SecurityAction};
use vinfo_engine::{AmperageOutcome, ChargeLimitOutcome, ChargeOutcome, CommandOutcome};

use super::{json_body, require_vehicle_id, Numeric};
use crate::auth::AccessToken;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandQuery {
    pub vehicle_id: Option<String>,
    pub make: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActionBody<A> {
    pub action: A,
}

#[derive(Debug, Deserialize)]
pub struct ChargeLimitBody {
    /// Percent, `0..=100`
    pub limit: Numeric,
}

#[derive(Debug, Deserialize)]
pub struct AmperageBody {
    pub amperage: Numeric,
}

/// POST /vehicle/charge `{"action": "START" | "STOP"}`
pub async fn charge(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<CommandQuery>,
    body: Result<Json<ActionBody<ChargeAction>>, JsonRejection>,
) -> Result<Json<ChargeOutcome>, ApiError> {
    let vehicle_id = require_vehicle_id(query.vehicle_id.as_deref())?;
    let action = json_body(body)
        .map_err(|_| ApiError::BadRequest("Missing or invalid charge action".to_string()))?
        .action;

    let connection = state
        .provider()
        .connect(vehicle_id, &token.0, state.default_unit_system());
    let outcome = state.service().charge(connection.as_ref(), action).await?;

    Ok(Json(outcome))
}

/// POST /vehicle/charge-limit `{"limit": 80}`
pub async fn charge_limit(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<CommandQuery>,
    body: Result<Json<ChargeLimitBody>, JsonRejection>,
) -> Result<Json<ChargeLimitOutcome>, ApiError> {
    let vehicle_id = require_vehicle_id(query.vehicle_id.as_deref())?;
    let limit = json_body(body)?
        .limit
        .value()
        .ok_or_else(|| ApiError::BadRequest("Charge limit is not a number".to_string()))?;

    let connection = state
        .provider()
        .connect(vehicle_id, &token.0, state.default_unit_system());
    let outcome = state
        .service()
        .set_charge_limit(connection.as_ref(), limit)
        .await?;

    Ok(Json(outcome))
}

/// POST /vehicle/amperage `{"amperage": 32}`
pub async fn amperage(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<CommandQuery>,
    body: Result<Json<AmperageBody>, JsonRejection>,
) -> Result<Json<AmperageOutcome>, ApiError> {
    let vehicle_id = require_vehicle_id(query.vehicle_id.as_deref())?;
    let amperage = json_body(body)?
        .amperage
        .value()
        .ok_or_else(|| ApiError::BadRequest("Amperage is not a number".to_string()))?;
    let make = query.make.as_deref().map(str::trim).filter(|m| !m.is_empty());

    let connection = state
        .provider()
        .connect(vehicle_id, &token.0, state.default_unit_system());
    let outcome = state
        .service()
        .set_amperage(connection.as_ref(), make, amperage)
        .await?;

    Ok(Json(outcome))
}

/// POST /vehicle/security `{"action": "LOCK" | "UNLOCK"}`
pub async fn security(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<CommandQuery>,
    body: Result<Json<ActionBody<SecurityAction>>, JsonRejection>,
) -> Result<Json<CommandOutcome>, ApiError> {
    let vehicle_id = require_vehicle_id(query.vehicle_id.as_deref())?;
    let action = json_body(body)
        .map_err(|_| ApiError::BadRequest("Missing or invalid security action".to_string()))?
        .action;

    let connection = state
        .provider()
        .connect(vehicle_id, &token.0, state.default_unit_system());
    let outcome = state.service().security(connection.as_ref(), action).await?;

    Ok(Json(outcome))
}
