//! HTTP request handlers for the vehicle-info API

pub mod control;
pub mod properties;
pub mod vehicles;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;
use vinfo_core::UnitSystem;

use crate::error::ApiError;

/// Trimmed, non-empty `vehicleId`, or 400
pub fn require_vehicle_id(raw: Option<&str>) -> Result<&str, ApiError> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("vehicleId is required".to_string()))
}

/// Unwrap a JSON body, turning a rejection into a 400 with `{error, message}`
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// A number sent either as a JSON number or as a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// The finite value, if there is one
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Numeric::Number(n) => *n,
            Numeric::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Split a `.`-delimited property list, ignoring empty segments
pub fn parse_property_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse an optional unit system, falling back to `default`
pub fn parse_unit_system(raw: Option<&str>, default: UnitSystem) -> Result<UnitSystem, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse().map_err(ApiError::BadRequest),
        None => Ok(default),
    }
}
