//! vinfo-proxy - Vehicle connections over the vehicle-data REST API
//!
//! Implements `VehicleConnection` and `ConnectionProvider` on top of
//! `VehicleApiClient`, classifying every vendor failure into the core
//! error vocabulary so the engine never sees HTTP details.

mod classify;
mod proxy;

pub use classify::{classify, settle};
pub use proxy::{HttpConnectionProvider, HttpVehicleConnection};
