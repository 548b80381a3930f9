//! Error types for vehicle-data API client operations

use thiserror::Error;

use crate::types::VendorError;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, VehicleApiError>;

/// Errors that can occur while calling the vehicle-data API
#[derive(Error, Debug)]
pub enum VehicleApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The API answered with an error status
    #[error("Vehicle API error {status}: {}", .error.message())]
    Api { status: u16, error: VendorError },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Timeout
    #[error("Request timed out")]
    Timeout,
}

impl VehicleApiError {
    /// Create an API error from a status code and vendor error body
    pub fn api(status: u16, error: VendorError) -> Self {
        Self::Api { status, error }
    }

    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}
