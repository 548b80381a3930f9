//! Common error types for vehicle connections

use thiserror::Error;

use crate::models::{ErrorKind, TypedError};

/// Result type for connection operations
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Errors that can occur while talking to a vehicle connection
#[derive(Debug, Clone, Error)]
pub enum ConnectionError {
    /// The grant for this request was never obtained
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Access token missing, expired or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Vehicle id unknown to the vehicle-data API
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    /// Rate limited by the vehicle-data API
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Vehicle does not support the request
    #[error("Incompatible vehicle: {0}")]
    Compatibility(String),

    /// Vehicle is asleep, offline or otherwise unable to answer
    #[error("Vehicle state error: {0}")]
    VehicleState(String),

    /// The manufacturer backend behind the vehicle-data API failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The value could not be produced (resource missing, generic failure)
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Transport/communication error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Timeout waiting for response
    #[error("Operation timed out")]
    Timeout,

    /// Response could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConnectionError {
    /// Classify this error for per-property reporting
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConnectionError::Permission(_) => ErrorKind::Permission,
            ConnectionError::Authentication(_) => ErrorKind::Authentication,
            ConnectionError::VehicleNotFound(_) => ErrorKind::Unavailable,
            ConnectionError::RateLimited(_) => ErrorKind::RateLimit,
            ConnectionError::Compatibility(_) => ErrorKind::Compatibility,
            ConnectionError::VehicleState(_) => ErrorKind::VehicleState,
            ConnectionError::Upstream(_) => ErrorKind::Upstream,
            ConnectionError::Unavailable(_) => ErrorKind::Unavailable,
            ConnectionError::Transport(_) => ErrorKind::Unavailable,
            ConnectionError::Timeout => ErrorKind::Timeout,
            ConnectionError::InvalidResponse(_) => ErrorKind::Unavailable,
            ConnectionError::Internal(_) => ErrorKind::Unknown,
        }
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ConnectionError::Permission(_) => 403,
            ConnectionError::Authentication(_) => 401,
            ConnectionError::VehicleNotFound(_) => 404,
            ConnectionError::RateLimited(_) => 429,
            ConnectionError::Compatibility(_) => 501,
            ConnectionError::VehicleState(_) => 409,
            ConnectionError::Upstream(_) => 502,
            ConnectionError::Unavailable(_) => 502,
            ConnectionError::Transport(_) => 503,
            ConnectionError::Timeout => 504,
            ConnectionError::InvalidResponse(_) => 502,
            ConnectionError::Internal(_) => 500,
        }
    }

    /// Convert into the per-property error payload
    pub fn into_typed(self) -> TypedError {
        let kind = self.kind();
        let message = match self {
            ConnectionError::Permission(msg)
            | ConnectionError::Authentication(msg)
            | ConnectionError::VehicleNotFound(msg)
            | ConnectionError::RateLimited(msg)
            | ConnectionError::Compatibility(msg)
            | ConnectionError::VehicleState(msg)
            | ConnectionError::Upstream(msg)
            | ConnectionError::Unavailable(msg)
            | ConnectionError::Transport(msg)
            | ConnectionError::InvalidResponse(msg)
            | ConnectionError::Internal(msg) => msg,
            ConnectionError::Timeout => "Operation timed out".to_string(),
        };
        TypedError::new(kind, message)
    }
}

impl From<ConnectionError> for TypedError {
    fn from(err: ConnectionError) -> Self {
        err.into_typed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_keeps_its_kind() {
        let typed = ConnectionError::Permission("read_vin not granted".into()).into_typed();
        assert_eq!(typed.kind, ErrorKind::Permission);
        assert_eq!(typed.message, "read_vin not granted");
    }

    #[test]
    fn timeout_gets_a_message() {
        let typed = ConnectionError::Timeout.into_typed();
        assert_eq!(typed.kind, ErrorKind::Timeout);
        assert!(!typed.message.is_empty());
    }

    #[test]
    fn transport_failures_are_unavailable() {
        let err = ConnectionError::Transport("connection reset".into());
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert_eq!(err.status_code(), 503);
    }
}
