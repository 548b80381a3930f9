//! Error types for the property registry

use thiserror::Error;

/// Errors raised by registry lookups and loading
#[derive(Debug, Error)]
pub enum PropsError {
    /// Property name not registered
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    /// A brand-specific property was requested without a make
    #[error("property '{0}' requires a vehicle make")]
    MissingMake(String),

    /// A configured definition is malformed
    #[error("invalid property definition: {0}")]
    InvalidDefinition(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PropsError {
    /// Whether the caller asked for something invalid (as opposed to a
    /// configuration problem)
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            PropsError::UnknownProperty(_) | PropsError::MissingMake(_)
        )
    }
}

/// Result type for registry operations
pub type PropsResult<T> = Result<T, PropsError>;
