//! vinfo-engine - Vehicle-info aggregation
//!
//! Turns a list of logical properties into as few vehicle requests as
//! possible, runs them as one batch, and maps every settled request back
//! onto the properties that share it.
//!
//! # Architecture
//!
//! ```text
//!  requested properties ──► plan ──► [Endpoint] ──► BatchExecutor ──► BatchResult
//!          │                                              │
//!          │                                      VehicleConnection
//!          ▼                                              │
//!      reconcile ◄────────────────────────────────────────┘
//!          │
//!          ▼
//!     VehicleInfo { id, make, <property>: value | error }
//! ```
//!
//! Listing vehicles fans out one attribute fetch per vehicle
//! ([`aggregate_attributes`]); one failed vehicle never affects the others.
//! Disconnecting all vehicles fans out the same way.
//!
//! Commands (charging, charge limit, amperage, locks) go straight to the
//! connection; a charge command reads the charge state back through a
//! one-endpoint batch.

pub mod aggregator;
pub mod control;
pub mod error;
pub mod executor;
pub mod planner;
pub mod reconciler;
pub mod service;

pub use aggregator::{aggregate_attributes, disconnect_each};
pub use control::{
    AmperageOutcome, ChargeLimitOutcome, ChargeOutcome, CommandOutcome, DisconnectFailure,
    DisconnectReport,
};
pub use error::{EngineError, EngineResult};
pub use executor::BatchExecutor;
pub use planner::plan;
pub use reconciler::reconcile;
pub use service::{VehicleInfoService, VehicleListing};
