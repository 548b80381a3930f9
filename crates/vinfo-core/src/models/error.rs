//! Typed per-property errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when no better description of a failure is available
pub const UNAVAILABLE_MESSAGE: &str = "Unavailable information";

/// Classification of a per-property or per-vehicle failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The grant needed for the request was never obtained
    Permission,
    /// Any other failure to produce the value (offline, malformed, missing field)
    Unavailable,
    /// The request did not complete in time
    Timeout,
    /// The access token was rejected
    Authentication,
    /// Too many requests
    RateLimit,
    /// The vehicle does not support the request
    Compatibility,
    /// The vehicle is in a state that prevents answering
    VehicleState,
    /// The manufacturer backend failed
    Upstream,
    /// Anything else
    #[serde(other)]
    Unknown,
}

impl ErrorKind {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Permission => "PERMISSION",
            ErrorKind::Unavailable => "UNAVAILABLE",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::Authentication => "AUTHENTICATION",
            ErrorKind::RateLimit => "RATE_LIMIT",
            ErrorKind::Compatibility => "COMPATIBILITY",
            ErrorKind::VehicleState => "VEHICLE_STATE",
            ErrorKind::Upstream => "UPSTREAM",
            ErrorKind::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error payload carried by a single property or a single vehicle entry
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct TypedError {
    /// Human-readable description, never empty
    pub message: String,
    /// Failure classification
    pub kind: ErrorKind,
}

impl TypedError {
    /// Create a typed error; an empty message is replaced with a generic one
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNAVAILABLE_MESSAGE.to_string()
        } else {
            message
        };
        Self { message, kind }
    }

    /// Create an `UNAVAILABLE` error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }

    /// Create a `PERMISSION` error
    pub fn permission(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Permission, message)
    }

    /// Whether the failure is a permission denial
    pub fn is_permission(&self) -> bool {
        self.kind == ErrorKind::Permission
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_message_and_kind() {
        let err = TypedError::unavailable("timeout");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"message": "timeout", "kind": "UNAVAILABLE"})
        );
    }

    #[test]
    fn empty_message_is_replaced() {
        let err = TypedError::new(ErrorKind::Upstream, "  ");
        assert_eq!(err.message, UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn unknown_kinds_deserialize_as_unknown() {
        let err: TypedError =
            serde_json::from_value(json!({"message": "m", "kind": "BILLING"})).unwrap();
        assert_eq!(err.kind, ErrorKind::Unknown);
    }
}
