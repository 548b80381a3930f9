//! Vehicle-data API client library
//!
//! Provides a typed HTTP client for the third-party REST API that fronts
//! the connected vehicles: listing vehicles, reading their attributes, and
//! reading several endpoints at once through the batch call.
//!
//! # Example
//!
//! ```rust,no_run
//! use vinfo_client::VehicleApiClient;
//! use vinfo_core::UnitSystem;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VehicleApiClient::new("https://api.smartcar.com/v2.0")?;
//!
//!     let list = client.list_vehicles("access-token").await?;
//!     for id in &list.vehicles {
//!         let batch = client
//!             .batch(id, "access-token", UnitSystem::Metric, &["/odometer", "/battery"])
//!             .await?;
//!         println!("{}: {} responses", id, batch.responses.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module serves an axum router on a local port, optionally
//! under the API's version prefix:
//!
//! ```rust,ignore
//! use vinfo_client::testing::TestServer;
//!
//! let server = TestServer::start_nested("/v2.0", fake_vehicle_api()).await?;
//! let list = server.client.list_vehicles("token").await?;
//! ```

pub mod client;
pub mod error;
pub mod testing;
pub mod types;

pub use client::{VehicleApiClient, UNIT_SYSTEM_HEADER};
pub use error::{Result, VehicleApiError};
pub use types::*;
