//! vinfo-props - Property registry for vehicle-info aggregation
//!
//! Maps logical property names (`batteryLevel`, `chargeState`, ...) to the
//! request that serves them and to the extraction applied to that request's
//! response. Several properties may share one request; brand-specific
//! properties are only defined for a fixed set of makes.
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use vinfo_core::{Endpoint, PropertyValue, Settlement};
//! use vinfo_props::PropertyRegistry;
//!
//! let registry = PropertyRegistry::builtin();
//!
//! let level = registry.lookup("batteryLevel").unwrap();
//! assert_eq!(level.resolve(Some("TESLA")).unwrap(), Some(Endpoint::new("/battery")));
//!
//! let body = Settlement::Success(json!({"percentRemaining": 0.3, "range": 40.5}));
//! assert_eq!(level.extract(&body), PropertyValue::Value(json!(0.3)));
//!
//! // Brand-specific: only defined for some makes
//! let amperage = registry.lookup("amperage").unwrap();
//! assert_eq!(amperage.resolve(Some("FORD")).unwrap(), None);
//! ```
//!
//! # TOML Definition Files
//!
//! ```toml
//! [[properties]]
//! name = "speed"
//! endpoint = "/speed"
//! field = "speed"
//! permission = "read_speedometer"
//! text = "Speed"
//! # supported_makes = ["TESLA"]   # brand-specific endpoint
//! # transform = "percent"         # fraction -> rounded percentage
//! ```

pub mod builtin;
pub mod definition;
pub mod error;
pub mod registry;

pub use definition::{PropertyDefinition, PropertyEntry, RequestSource, Transform};
pub use error::{PropsError, PropsResult};
pub use registry::PropertyRegistry;
