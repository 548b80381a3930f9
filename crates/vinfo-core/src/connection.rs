//! VehicleConnection trait - the capability the engine aggregates over

use std::sync::Arc;

use async_trait::async_trait;

use crate::endpoint::Endpoint;
use crate::error::ConnectionResult;
use serde_json::Value;

use crate::error::ConnectionError;
use crate::models::{Attributes, ChargeAction, CommandAck, SecurityAction, Settlement, UnitSystem};

/// A handle to one vehicle on the vehicle-data API.
///
/// Implementations issue requests on behalf of a single vehicle and access
/// token. The engine never talks to the network directly; it only sees
/// this trait.
#[async_trait]
pub trait VehicleConnection: Send + Sync {
    /// Identifier of the vehicle this connection talks to
    fn vehicle_id(&self) -> &str;

    /// Unit system requested for measured values
    fn unit_system(&self) -> UnitSystem {
        UnitSystem::Imperial
    }

    /// Issue one combined request for a set of endpoints.
    ///
    /// Returns one settlement per endpoint that the API answered. An `Err`
    /// means the whole batch failed and no endpoint was settled.
    async fn batch(&self, endpoints: &[Endpoint]) -> ConnectionResult<Vec<(Endpoint, Settlement)>>;

    /// Fetch identifying attributes (id, make, model, year)
    async fn attributes(&self) -> ConnectionResult<Attributes>;

    // =========================================================================
    // Commands
    // =========================================================================

    /// Start or stop charging
    async fn charge(&self, action: ChargeAction) -> ConnectionResult<CommandAck> {
        Err(not_supported(&format!("{} charge", action)))
    }

    /// Set the charge limit as a fraction of capacity (`0.8` for 80%)
    async fn set_charge_limit(&self, _fraction: f64) -> ConnectionResult<CommandAck> {
        Err(not_supported("Setting the charge limit"))
    }

    /// Lock or unlock the doors
    async fn security(&self, action: SecurityAction) -> ConnectionResult<CommandAck> {
        Err(not_supported(action.as_str()))
    }

    /// Send a command to an endpoint that has no dedicated method, such as
    /// a brand-specific one
    async fn command(&self, endpoint: &Endpoint, _body: Value) -> ConnectionResult<CommandAck> {
        Err(not_supported(endpoint.as_str()))
    }

    /// Revoke this application's access to the vehicle
    async fn disconnect(&self) -> ConnectionResult<()> {
        Err(not_supported("Disconnecting"))
    }
}

fn not_supported(what: &str) -> ConnectionError {
    ConnectionError::Compatibility(format!("{} is not supported by this connection", what))
}

/// Produces connections for an access token
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// List the vehicle ids the token grants access to
    async fn list_vehicles(&self, access_token: &str) -> ConnectionResult<Vec<String>>;

    /// Open a connection to one vehicle
    fn connect(
        &self,
        vehicle_id: &str,
        access_token: &str,
        unit_system: UnitSystem,
    ) -> Arc<dyn VehicleConnection>;
}
