//! Vendor failure classification

use vinfo_client::{BatchResponseItem, VehicleApiError, VendorError};
use vinfo_core::{ConnectionError, Endpoint, Settlement};

/// Classify a vendor error response.
///
/// The error body's `type` wins; without a recognised type the HTTP status
/// decides.
pub fn classify(status: u16, error: &VendorError) -> ConnectionError {
    let message = error.message().to_string();

    let by_type = error.error_type.as_deref().and_then(|t| {
        Some(match t.to_ascii_uppercase().as_str() {
            "PERMISSION" => ConnectionError::Permission(message.clone()),
            "AUTHENTICATION" => ConnectionError::Authentication(message.clone()),
            "RATE_LIMIT" => ConnectionError::RateLimited(message.clone()),
            "COMPATIBILITY" => ConnectionError::Compatibility(message.clone()),
            "VEHICLE_STATE" => ConnectionError::VehicleState(message.clone()),
            "UPSTREAM" | "SERVER" => ConnectionError::Upstream(message.clone()),
            "RESOURCE_NOT_FOUND" => ConnectionError::VehicleNotFound(message.clone()),
            _ => return None,
        })
    });
    if let Some(err) = by_type {
        return err;
    }

    match status {
        401 => ConnectionError::Authentication(message),
        403 => ConnectionError::Permission(message),
        408 | 504 => ConnectionError::Timeout,
        429 => ConnectionError::RateLimited(message),
        _ => ConnectionError::Unavailable(message),
    }
}

/// Map a client error to a connection error
pub(crate) fn map_err(e: VehicleApiError) -> ConnectionError {
    match e {
        VehicleApiError::Api { status, error } => classify(status, &error),
        VehicleApiError::Timeout => ConnectionError::Timeout,
        VehicleApiError::Http(e) => ConnectionError::Transport(e.to_string()),
        VehicleApiError::ParseError(m) => ConnectionError::InvalidResponse(m),
        other => ConnectionError::Internal(other.to_string()),
    }
}

/// Turn one batch response item into an endpoint settlement
pub fn settle(item: BatchResponseItem) -> (Endpoint, Settlement) {
    let success = item.is_success();
    let endpoint = Endpoint::new(item.path);
    if success {
        return (endpoint, Settlement::Success(item.body));
    }
    let error = classify(item.code, &VendorError::from_value(&item.body));
    (endpoint, Settlement::Failure(error.into_typed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use vinfo_core::{ErrorKind, UNAVAILABLE_MESSAGE};

    fn vendor(error_type: Option<&str>) -> VendorError {
        VendorError {
            error_type: error_type.map(str::to_string),
            description: Some("details".to_string()),
            ..Default::default()
        }
    }

    #[rstest]
    #[case(Some("PERMISSION"), 403, ErrorKind::Permission)]
    #[case(Some("permission"), 200, ErrorKind::Permission)]
    #[case(Some("AUTHENTICATION"), 401, ErrorKind::Authentication)]
    #[case(Some("RATE_LIMIT"), 429, ErrorKind::RateLimit)]
    #[case(Some("COMPATIBILITY"), 501, ErrorKind::Compatibility)]
    #[case(Some("VEHICLE_STATE"), 409, ErrorKind::VehicleState)]
    #[case(Some("UPSTREAM"), 502, ErrorKind::Upstream)]
    #[case(Some("SERVER"), 500, ErrorKind::Upstream)]
    #[case(Some("RESOURCE_NOT_FOUND"), 404, ErrorKind::Unavailable)]
    #[case(Some("SOMETHING_NEW"), 403, ErrorKind::Permission)]
    #[case(None, 401, ErrorKind::Authentication)]
    #[case(None, 403, ErrorKind::Permission)]
    #[case(None, 408, ErrorKind::Timeout)]
    #[case(None, 504, ErrorKind::Timeout)]
    #[case(None, 429, ErrorKind::RateLimit)]
    #[case(None, 500, ErrorKind::Unavailable)]
    #[case(None, 404, ErrorKind::Unavailable)]
    fn classification(
        #[case] error_type: Option<&str>,
        #[case] status: u16,
        #[case] expected: ErrorKind,
    ) {
        assert_eq!(classify(status, &vendor(error_type)).kind(), expected);
    }

    #[test]
    fn settles_success_items() {
        let item = BatchResponseItem {
            path: "/odometer".into(),
            code: 200,
            body: json!({"distance": 10}),
            headers: None,
        };
        let (endpoint, settlement) = settle(item);
        assert_eq!(endpoint, Endpoint::new("/odometer"));
        assert_eq!(settlement, Settlement::Success(json!({"distance": 10})));
    }

    #[test]
    fn settles_failed_items_with_vendor_message() {
        let item = BatchResponseItem {
            path: "/vin".into(),
            code: 403,
            body: json!({"type": "PERMISSION", "description": "read_vin not granted"}),
            headers: None,
        };
        let (_, settlement) = settle(item);
        let error = settlement.error().unwrap();
        assert_eq!(error.kind, ErrorKind::Permission);
        assert_eq!(error.message, "read_vin not granted");
    }

    #[test]
    fn failed_item_without_body_is_unavailable() {
        let item = BatchResponseItem {
            path: "/engine/oil".into(),
            code: 500,
            body: serde_json::Value::Null,
            headers: None,
        };
        let (_, settlement) = settle(item);
        let error = settlement.error().unwrap();
        assert_eq!(error.kind, ErrorKind::Unavailable);
        assert_eq!(error.message, UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn client_timeouts_stay_timeouts() {
        assert_eq!(map_err(VehicleApiError::Timeout).kind(), ErrorKind::Timeout);
        assert_eq!(
            map_err(VehicleApiError::ParseError("bad json".into())).kind(),
            ErrorKind::Unavailable
        );
    }
}
