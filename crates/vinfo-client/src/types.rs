//! Wire types of the vehicle-data REST API

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vinfo_core::UNAVAILABLE_MESSAGE;

/// Response of `GET /vehicles`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleList {
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub paging: Paging,
}

/// Paging information of a vehicle listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub offset: u32,
}

/// Response of `GET /vehicles/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleAttributesResponse {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl From<VehicleAttributesResponse> for vinfo_core::Attributes {
    fn from(resp: VehicleAttributesResponse) -> Self {
        Self {
            id: resp.id,
            make: resp.make,
            model: resp.model,
            year: resp.year,
        }
    }
}

/// Body of the charge and security commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: String,
}

impl ActionRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}

/// Body of `POST /vehicles/{id}/charge/limit`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeLimitRequest {
    /// Fraction of capacity, `0.0..=1.0`
    pub limit: f64,
}

/// Body of `POST /vehicles/{id}/batch`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub requests: Vec<BatchRequestItem>,
}

impl BatchRequest {
    /// Build a batch request for a list of paths
    pub fn new<S: AsRef<str>>(paths: &[S]) -> Self {
        Self {
            requests: paths
                .iter()
                .map(|p| BatchRequestItem {
                    path: p.as_ref().to_string(),
                })
                .collect(),
        }
    }
}

/// One sub-request of a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequestItem {
    pub path: String,
}

/// Response of `POST /vehicles/{id}/batch`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResponse {
    pub responses: Vec<BatchResponseItem>,
}

/// Outcome of one sub-request of a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponseItem {
    pub path: String,
    pub code: u16,
    #[serde(default)]
    pub body: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
}

impl BatchResponseItem {
    /// Whether the sub-request succeeded (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// Error body returned by the vehicle-data API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorError {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl VendorError {
    /// Parse an error body leniently; unknown shapes yield an empty error
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Best available human-readable message
    pub fn message(&self) -> &str {
        [&self.description, &self.message]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|m| !m.trim().is_empty())
            .unwrap_or(UNAVAILABLE_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vendor_error_prefers_description() {
        let err = VendorError::from_value(&json!({
            "type": "PERMISSION",
            "description": "Your application has insufficient permissions",
            "message": "forbidden",
            "statusCode": 403
        }));
        assert_eq!(err.error_type.as_deref(), Some("PERMISSION"));
        assert_eq!(err.status_code, Some(403));
        assert_eq!(err.message(), "Your application has insufficient permissions");
    }

    #[test]
    fn vendor_error_message_fallbacks() {
        let err = VendorError::from_value(&json!({"message": "Vehicle asleep"}));
        assert_eq!(err.message(), "Vehicle asleep");

        let err = VendorError::from_value(&json!({"description": ""}));
        assert_eq!(err.message(), UNAVAILABLE_MESSAGE);

        let err = VendorError::from_value(&json!("not an object"));
        assert_eq!(err, VendorError::default());
    }

    #[test]
    fn batch_item_status() {
        let item: BatchResponseItem =
            serde_json::from_value(json!({"path": "/odometer", "code": 200, "body": {"distance": 1}}))
                .unwrap();
        assert!(item.is_success());

        let item: BatchResponseItem =
            serde_json::from_value(json!({"path": "/vin", "code": 403})).unwrap();
        assert!(!item.is_success());
        assert!(item.body.is_null());
    }

    #[test]
    fn batch_request_shape() {
        let req = BatchRequest::new(&["/charge", "/battery"]);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"requests": [{"path": "/charge"}, {"path": "/battery"}]})
        );
    }
}
