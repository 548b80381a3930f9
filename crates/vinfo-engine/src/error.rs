//! Error types for the aggregation engine

use thiserror::Error;
use vinfo_core::ConnectionError;
use vinfo_props::PropsError;

/// Errors surfaced to the caller of an aggregation.
///
/// Per-property and per-vehicle failures never end up here; they are
/// reported inside the result.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Unknown property, missing make, or bad registry definition
    #[error(transparent)]
    Property(#[from] PropsError),

    /// A call that the whole result depends on failed (e.g. listing vehicles)
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// A command argument is out of range or not applicable to the vehicle
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl EngineError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::Property(e) if e.is_caller_error() => 400,
            EngineError::Property(_) => 500,
            EngineError::Connection(e) => e.status_code(),
            EngineError::InvalidCommand(_) => 400,
        }
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
