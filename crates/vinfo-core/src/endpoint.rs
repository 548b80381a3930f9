//! Request endpoints.
//!
//! An [`Endpoint`] identifies one physical request against a vehicle
//! connection (a path such as `/charge`). Several logical properties may
//! read the same endpoint, so endpoints are compared by value and used as
//! map keys when a batch is settled.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path of one request against the vehicle-data API
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    /// Create an endpoint from a path, adding the leading `/` if missing.
    ///
    /// ```
    /// # use vinfo_core::Endpoint;
    /// assert_eq!(Endpoint::new("/charge").as_str(), "/charge");
    /// assert_eq!(Endpoint::new("odometer").as_str(), "/odometer");
    /// assert_eq!(Endpoint::new("/").as_str(), "/");
    /// ```
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.starts_with('/') {
            Self(path)
        } else {
            Self(format!("/{}", path))
        }
    }

    /// Build a brand-specific endpoint: `/<make lower-cased><path>`.
    ///
    /// ```
    /// # use vinfo_core::Endpoint;
    /// assert_eq!(
    ///     Endpoint::for_make("TESLA", "/charge/ammeter").as_str(),
    ///     "/tesla/charge/ammeter"
    /// );
    /// assert_eq!(
    ///     Endpoint::for_make("Chevrolet", "charge/voltmeter").as_str(),
    ///     "/chevrolet/charge/voltmeter"
    /// );
    /// ```
    pub fn for_make(make: &str, path: &str) -> Self {
        let path = path.trim_start_matches('/');
        Self(format!("/{}/{}", make.to_lowercase(), path))
    }

    /// The path as sent to the vehicle-data API
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Endpoint {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
