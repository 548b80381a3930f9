//! HttpVehicleConnection - VehicleConnection over the vehicle-data REST API

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use vinfo_client::VehicleApiClient;
use serde_json::Value;
use vinfo_core::{
    Attributes, ChargeAction, CommandAck, ConnectionProvider, ConnectionResult, Endpoint,
    SecurityAction, Settlement, UnitSystem, VehicleConnection,
};

use crate::classify::{map_err, settle};

/// A `VehicleConnection` for one vehicle and access token.
///
/// The batch call's per-request outcomes become settlements; a failure of
/// the batch call itself is returned as an error for the engine to fan out.
pub struct HttpVehicleConnection {
    client: VehicleApiClient,
    vehicle_id: String,
    access_token: String,
    unit_system: UnitSystem,
}

impl HttpVehicleConnection {
    /// Create a connection for `vehicle_id`
    pub fn new(
        client: VehicleApiClient,
        vehicle_id: impl Into<String>,
        access_token: impl Into<String>,
        unit_system: UnitSystem,
    ) -> Self {
        Self {
            client,
            vehicle_id: vehicle_id.into(),
            access_token: access_token.into(),
            unit_system,
        }
    }
}

#[async_trait]
impl VehicleConnection for HttpVehicleConnection {
    fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    async fn batch(&self, endpoints: &[Endpoint]) -> ConnectionResult<Vec<(Endpoint, Settlement)>> {
        let paths: Vec<&str> = endpoints.iter().map(Endpoint::as_str).collect();
        let response = self
            .client
            .batch(&self.vehicle_id, &self.access_token, self.unit_system, &paths)
            .await
            .map_err(map_err)?;

        debug!(
            vehicle_id = %self.vehicle_id,
            requested = paths.len(),
            answered = response.responses.len(),
            "Batch answered"
        );
        Ok(response.responses.into_iter().map(settle).collect())
    }

    async fn attributes(&self) -> ConnectionResult<Attributes> {
        self.client
            .get_attributes(&self.vehicle_id, &self.access_token)
            .await
            .map(Attributes::from)
            .map_err(map_err)
    }

    async fn charge(&self, action: ChargeAction) -> ConnectionResult<CommandAck> {
        debug!(vehicle_id = %self.vehicle_id, %action, "Charge command");
        self.client
            .charge(&self.vehicle_id, &self.access_token, action)
            .await
            .map_err(map_err)
    }

    async fn set_charge_limit(&self, fraction: f64) -> ConnectionResult<CommandAck> {
        debug!(vehicle_id = %self.vehicle_id, fraction, "Charge limit command");
        self.client
            .set_charge_limit(&self.vehicle_id, &self.access_token, fraction)
            .await
            .map_err(map_err)
    }

    async fn security(&self, action: SecurityAction) -> ConnectionResult<CommandAck> {
        debug!(vehicle_id = %self.vehicle_id, %action, "Security command");
        self.client
            .security(&self.vehicle_id, &self.access_token, action)
            .await
            .map_err(map_err)
    }

    async fn command(&self, endpoint: &Endpoint, body: Value) -> ConnectionResult<CommandAck> {
        debug!(vehicle_id = %self.vehicle_id, %endpoint, "Command");
        self.client
            .command(&self.vehicle_id, &self.access_token, endpoint.as_str(), &body)
            .await
            .map_err(map_err)
    }

    async fn disconnect(&self) -> ConnectionResult<()> {
        debug!(vehicle_id = %self.vehicle_id, "Disconnect");
        self.client
            .disconnect(&self.vehicle_id, &self.access_token)
            .await
            .map_err(map_err)
    }
}

/// Hands out `HttpVehicleConnection`s sharing one client
#[derive(Debug, Clone)]
pub struct HttpConnectionProvider {
    client: VehicleApiClient,
}

impl HttpConnectionProvider {
    /// Create a provider over a client
    pub fn new(client: VehicleApiClient) -> Self {
        Self { client }
    }

    /// The underlying client
    pub fn client(&self) -> &VehicleApiClient {
        &self.client
    }
}

#[async_trait]
impl ConnectionProvider for HttpConnectionProvider {
    async fn list_vehicles(&self, access_token: &str) -> ConnectionResult<Vec<String>> {
        self.client
            .list_vehicles(access_token)
            .await
            .map(|list| list.vehicles)
            .map_err(map_err)
    }

    fn connect(
        &self,
        vehicle_id: &str,
        access_token: &str,
        unit_system: UnitSystem,
    ) -> Arc<dyn VehicleConnection> {
        Arc::new(HttpVehicleConnection::new(
            self.client.clone(),
            vehicle_id,
            access_token,
            unit_system,
        ))
    }
}
