//! Shared data models for vehicle-info aggregation

mod control;
mod error;
mod settlement;
mod units;
mod vehicle;

pub use control::*;
pub use error::*;
pub use settlement::*;
pub use units::*;
pub use vehicle::*;
