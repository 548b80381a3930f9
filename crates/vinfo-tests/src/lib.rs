//! End-to-end tests for the vehicle-info server
//!
//! The tests run the full stack in-process:
//! - a fake vehicle-data API (axum) standing in for the third-party service
//! - `vinfo-proxy` connections talking to it over real HTTP
//! - the `vinfo-api` router served on a local port
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vinfo-tests
//! ```
//!
//! # Test Structure
//!
//! - `tests/common` - fake vehicle-data API and stack setup
//! - `e2e_test.rs` - listing, single-vehicle reads and failure handling

// This crate only contains tests, no library code
