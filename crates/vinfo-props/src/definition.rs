//! Property definitions
//!
//! A [`PropertyDefinition`] says which request serves a logical property
//! and how to pull the property's value out of that request's response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vinfo_core::{Endpoint, PropertyValue, Settlement, TypedError};

use crate::error::{PropsError, PropsResult};

/// Where a property's request goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    /// Same endpoint for every make
    Fixed(Endpoint),
    /// Brand-specific endpoint `/<make>/<path>`, only defined for the listed makes
    MakeSpecific {
        supported_makes: Vec<String>,
        path: String,
    },
}

/// Post-processing applied to an extracted value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Value is returned as extracted
    #[default]
    None,
    /// Fraction in `[0, 1]` scaled to a rounded integer percentage
    Percent,
}

impl Transform {
    fn apply(self, value: Value) -> Result<Value, TypedError> {
        match self {
            Transform::None => Ok(value),
            Transform::Percent => {
                let fraction = match &value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                };
                fraction
                    .filter(|f| f.is_finite())
                    .map(|f| Value::from((f * 100.0).round() as i64))
                    .ok_or_else(|| TypedError::unavailable(format!("Not a number: {}", value)))
            }
        }
    }
}

/// Complete definition for a single logical property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    /// Logical name, e.g. `batteryLevel`
    pub name: String,
    /// Request that serves this property
    pub source: RequestSource,
    /// Path of the field to read; `None` returns the whole body without `meta`
    pub field: Option<Vec<String>>,
    /// Post-processing of the extracted value
    pub transform: Transform,
    /// Permission scope needed to read the property
    pub permission: Option<String>,
    /// Human-readable label
    pub text: Option<String>,
}

impl PropertyDefinition {
    /// Property served by the same endpoint for every make
    pub fn fixed(name: impl Into<String>, endpoint: impl Into<Endpoint>) -> Self {
        Self::with_source(name, RequestSource::Fixed(endpoint.into()))
    }

    /// Property served by a brand-specific endpoint
    pub fn make_specific<I, S>(name: impl Into<String>, supported_makes: I, path: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_source(
            name,
            RequestSource::MakeSpecific {
                supported_makes: supported_makes.into_iter().map(Into::into).collect(),
                path: path.trim_start_matches('/').to_string(),
            },
        )
    }

    fn with_source(name: impl Into<String>, source: RequestSource) -> Self {
        Self {
            name: name.into(),
            source,
            field: None,
            transform: Transform::None,
            permission: None,
            text: None,
        }
    }

    /// Read a (dotted) field path from the response body
    pub fn with_field(mut self, path: &str) -> Self {
        self.field = Some(path.split('.').map(str::to_string).collect());
        self
    }

    /// Set the transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the permission scope
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Set the display text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Makes this property is limited to, if brand-specific
    pub fn supported_makes(&self) -> Option<&[String]> {
        match &self.source {
            RequestSource::Fixed(_) => None,
            RequestSource::MakeSpecific {
                supported_makes, ..
            } => Some(supported_makes),
        }
    }

    /// Whether this property is available for `make` (case-insensitive)
    pub fn supports(&self, make: &str) -> bool {
        match self.supported_makes() {
            None => true,
            Some(makes) => makes.iter().any(|m| m.eq_ignore_ascii_case(make)),
        }
    }

    /// Resolve the endpoint for a vehicle.
    ///
    /// Returns `Ok(None)` when the property is brand-specific and `make` is
    /// not one of its makes, and [`PropsError::MissingMake`] when it is
    /// brand-specific and no make is known.
    pub fn resolve(&self, make: Option<&str>) -> PropsResult<Option<Endpoint>> {
        match &self.source {
            RequestSource::Fixed(endpoint) => Ok(Some(endpoint.clone())),
            RequestSource::MakeSpecific { path, .. } => {
                let make = make.ok_or_else(|| PropsError::MissingMake(self.name.clone()))?;
                if self.supports(make) {
                    Ok(Some(Endpoint::for_make(make, path)))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Turn a settled request into this property's value.
    ///
    /// Failures are passed through unchanged; any problem reading the
    /// success body becomes an `UNAVAILABLE` error.
    pub fn extract(&self, settlement: &Settlement) -> PropertyValue {
        match settlement {
            Settlement::Failure(error) => PropertyValue::error(error.clone()),
            Settlement::Success(body) => self.extract_value(body).into(),
        }
    }

    fn extract_value(&self, body: &Value) -> Result<Value, TypedError> {
        let value = match &self.field {
            None => without_meta(body)?,
            Some(path) => lookup_path(body, path)?.clone(),
        };
        self.transform.apply(value)
    }
}

fn without_meta(body: &Value) -> Result<Value, TypedError> {
    let object = body
        .as_object()
        .ok_or_else(|| TypedError::unavailable("Response body is not an object"))?;
    let stripped: Map<String, Value> = object
        .iter()
        .filter(|(key, _)| key.as_str() != "meta")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Ok(Value::Object(stripped))
}

fn lookup_path<'a>(body: &'a Value, path: &[String]) -> Result<&'a Value, TypedError> {
    path.iter().try_fold(body, |current, segment| {
        current
            .as_object()
            .and_then(|object| object.get(segment))
            .ok_or_else(|| {
                TypedError::unavailable(format!("Missing field '{}' in response", path.join(".")))
            })
    })
}

/// A definition as written in configuration (`[[properties]]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyEntry {
    pub name: String,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_makes: Option<Vec<String>>,
    #[serde(default)]
    pub transform: Transform,
}

/// Keys every vehicle info object already carries
const RESERVED_NAMES: [&str; 2] = ["id", "make"];

impl TryFrom<PropertyEntry> for PropertyDefinition {
    type Error = PropsError;

    fn try_from(entry: PropertyEntry) -> PropsResult<Self> {
        if entry.name.trim().is_empty() {
            return Err(PropsError::InvalidDefinition(
                "property name must not be empty".to_string(),
            ));
        }
        if RESERVED_NAMES.contains(&entry.name.as_str()) {
            return Err(PropsError::InvalidDefinition(format!(
                "{}: name is reserved for the vehicle itself",
                entry.name
            )));
        }
        if entry.field.as_deref().is_some_and(|f| f.split('.').any(str::is_empty)) {
            return Err(PropsError::InvalidDefinition(format!(
                "{}: field path has an empty segment",
                entry.name
            )));
        }

        let mut def = match entry.supported_makes {
            None => PropertyDefinition::fixed(entry.name, entry.endpoint.as_str()),
            Some(makes) if makes.is_empty() => {
                return Err(PropsError::InvalidDefinition(format!(
                    "{}: supported_makes must not be empty",
                    entry.name
                )))
            }
            Some(makes) => PropertyDefinition::make_specific(entry.name, makes, &entry.endpoint),
        };
        if let Some(field) = entry.field {
            def = def.with_field(&field);
        }
        def.permission = entry.permission;
        def.text = entry.text;
        Ok(def.with_transform(entry.transform))
    }
}
