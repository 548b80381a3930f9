//! Property registry listing

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use vinfo_props::PropertyDefinition;

use super::parse_property_list;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesQuery {
    /// `.`-delimited property names; all properties when omitted
    pub vehicle_properties: Option<String>,
}

/// One registered property
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    /// Present only for brand-specific properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_makes: Option<Vec<String>>,
}

impl From<&PropertyDefinition> for PropertyInfo {
    fn from(def: &PropertyDefinition) -> Self {
        Self {
            name: def.name.clone(),
            text: def.text.clone(),
            permission: def.permission.clone(),
            supported_makes: def.supported_makes().map(<[String]>::to_vec),
        }
    }
}

/// Response for listing properties
#[derive(Debug, Serialize)]
pub struct PropertyListResponse {
    pub properties: Vec<PropertyInfo>,
    /// Permission scopes needed to read the listed properties
    pub permissions: Vec<String>,
}

/// GET /properties
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<PropertiesQuery>,
) -> Result<Json<PropertyListResponse>, ApiError> {
    let registry = state.registry();
    let mut names = parse_property_list(query.vehicle_properties.as_deref());
    if names.is_empty() {
        names = registry.names().into_iter().map(str::to_string).collect();
    }

    let properties = names
        .iter()
        .map(|name| registry.lookup(name).map(PropertyInfo::from))
        .collect::<Result<Vec<_>, _>>()?;
    let permissions = registry.required_permissions(&names)?;

    Ok(Json(PropertyListResponse {
        properties,
        permissions,
    }))
}
