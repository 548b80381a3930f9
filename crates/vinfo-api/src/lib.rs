//! vinfo-api - HTTP API for vehicle-info aggregation
//!
//! Exposes the aggregation engine and vehicle commands over HTTP. Vehicle
//! routes require the caller's vehicle-data API access token as a bearer
//! token.
//!
//! # Usage
//!
//! ```ignore
//! use vinfo_api::{create_router, AppState};
//!
//! let service = VehicleInfoService::new(Arc::new(PropertyRegistry::builtin()));
//! let state = AppState::new(service, Arc::new(provider));
//! let router = create_router(state);
//! ```

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

pub use auth::AccessToken;
pub use error::ApiError;
pub use state::AppState;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the vehicle-info API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let vehicle_routes = Router::new()
        .route(
            "/vehicles",
            get(handlers::vehicles::list_vehicles).delete(handlers::vehicles::disconnect_all),
        )
        .route(
            "/vehicle",
            get(handlers::vehicles::get_vehicle).delete(handlers::vehicles::disconnect_vehicle),
        )
        // Commands
        .route("/vehicle/charge", post(handlers::control::charge))
        .route("/vehicle/charge-limit", post(handlers::control::charge_limit))
        .route("/vehicle/amperage", post(handlers::control::amperage))
        .route("/vehicle/security", post(handlers::control::security))
        .route_layer(middleware::from_fn(auth::require_bearer));

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Registry listing
        .route("/properties", get(handlers::properties::list_properties))
        .merge(vehicle_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
