//! vinfo-core - Core traits and types for vehicle-info aggregation
//!
//! This crate provides the shared vocabulary between the property registry,
//! the aggregation engine, and the transports that talk to a vehicle-data
//! API: request endpoints, settled batch outcomes, typed per-property
//! errors, and the `VehicleConnection` capability.

pub mod connection;
pub mod endpoint;
pub mod error;
pub mod models;

pub use connection::{ConnectionProvider, VehicleConnection};
pub use endpoint::Endpoint;
pub use error::{ConnectionError, ConnectionResult};
pub use models::*;
