//! Vehicle-level aggregates returned to callers

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::models::TypedError;

/// Value of one requested property: the extracted value or a typed error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Serialized as `{"error": {"message": ..., "kind": ...}}`
    Error { error: TypedError },
    /// Serialized as the bare value
    Value(Value),
}

impl PropertyValue {
    /// Wrap a typed error
    pub fn error(error: TypedError) -> Self {
        PropertyValue::Error { error }
    }

    /// Extracted value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            PropertyValue::Value(value) => Some(value),
            PropertyValue::Error { .. } => None,
        }
    }

    /// Typed error, if any
    pub fn as_error(&self) -> Option<&TypedError> {
        match self {
            PropertyValue::Error { error } => Some(error),
            PropertyValue::Value(_) => None,
        }
    }

    /// Whether this property failed
    pub fn is_error(&self) -> bool {
        matches!(self, PropertyValue::Error { .. })
    }
}

impl From<Result<Value, TypedError>> for PropertyValue {
    fn from(result: Result<Value, TypedError>) -> Self {
        match result {
            Ok(value) => PropertyValue::Value(value),
            Err(error) => PropertyValue::error(error),
        }
    }
}

/// Information about one vehicle, keyed by requested property.
///
/// Serializes as a flat object: `id`, `make`, then one key per resolved
/// property in the order the properties were requested.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleInfo {
    /// Vehicle identifier
    pub id: String,
    /// Manufacturer, if known
    pub make: Option<String>,
    properties: Vec<(String, PropertyValue)>,
}

impl VehicleInfo {
    /// Create an info object with no properties
    pub fn new(id: impl Into<String>, make: Option<String>) -> Self {
        Self {
            id: id.into(),
            make,
            properties: Vec::new(),
        }
    }

    /// Set a property. A name that is already present keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        let name = name.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.properties.push((name, value)),
        }
    }

    /// Look up a property by name
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Whether a property is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Property names in output order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(n, _)| n.as_str())
    }

    /// All properties in output order
    pub fn properties(&self) -> &[(String, PropertyValue)] {
        &self.properties
    }

    /// Number of properties (excluding `id` and `make`)
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether no properties were resolved
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Serialize for VehicleInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.properties.len() + 1 + usize::from(self.make.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("id", &self.id)?;
        if let Some(make) = &self.make {
            map.serialize_entry("make", make)?;
        }
        for (name, value) in &self.properties {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Identifying attributes of a vehicle as reported by the vehicle-data API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: u32,
}

/// One entry of a vehicle listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VehicleAttributes {
    /// Attributes were fetched
    Resolved(Attributes),
    /// Attributes could not be fetched for this vehicle
    Failed { id: String, error: TypedError },
}

impl VehicleAttributes {
    /// Vehicle identifier, present in both variants
    pub fn id(&self) -> &str {
        match self {
            VehicleAttributes::Resolved(attrs) => &attrs.id,
            VehicleAttributes::Failed { id, .. } => id,
        }
    }

    /// Manufacturer, when resolved
    pub fn make(&self) -> Option<&str> {
        match self {
            VehicleAttributes::Resolved(attrs) => Some(&attrs.make),
            VehicleAttributes::Failed { .. } => None,
        }
    }

    /// Error, when the fetch failed
    pub fn error(&self) -> Option<&TypedError> {
        match self {
            VehicleAttributes::Resolved(_) => None,
            VehicleAttributes::Failed { error, .. } => Some(error),
        }
    }
}
