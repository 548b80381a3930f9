//! Vehicle commands: charging, charge limit, amperage, locks, disconnect

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::{info, instrument};
use vinfo_core::{
    ChargeAction, ConnectionProvider, PropertyValue, SecurityAction, TypedError, UnitSystem,
    VehicleConnection,
};

use crate::aggregator::disconnect_each;
use crate::error::{EngineError, EngineResult};
use crate::service::VehicleInfoService;

/// Property re-read after a charge command
const CHARGE_STATE_PROPERTY: &str = "chargeState";
/// Property whose endpoint receives amperage commands
const AMPERAGE_PROPERTY: &str = "amperage";

/// Acknowledgement of a command without further data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutcome {
    pub message: String,
}

/// Result of a charge command, with the charge state read afterwards
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeOutcome {
    pub message: String,
    /// Absent when the state may not be read with the granted permissions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_state: Option<PropertyValue>,
}

/// Result of a charge-limit command; `limit` is in percent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeLimitOutcome {
    pub limit: f64,
    pub message: String,
}

/// Result of an amperage command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmperageOutcome {
    pub amperage: f64,
    pub message: String,
}

/// One vehicle that could not be disconnected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisconnectFailure {
    pub id: String,
    pub error: TypedError,
}

/// Outcome of disconnecting every vehicle of a token
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisconnectReport {
    pub disconnected: Vec<String>,
    pub failed: Vec<DisconnectFailure>,
}

impl DisconnectReport {
    /// Whether every vehicle was disconnected
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl VehicleInfoService {
    /// Start or stop charging, then read the charge state back
    #[instrument(skip_all, fields(vehicle_id = %connection.vehicle_id(), %action))]
    pub async fn charge(
        &self,
        connection: &dyn VehicleConnection,
        action: ChargeAction,
    ) -> EngineResult<ChargeOutcome> {
        let ack = connection.charge(action).await?;
        info!("Charge command accepted");

        let state = self
            .vehicle_info(connection, None, &[CHARGE_STATE_PROPERTY])
            .await?;

        Ok(ChargeOutcome {
            message: ack.message().to_string(),
            charge_state: state.get(CHARGE_STATE_PROPERTY).cloned(),
        })
    }

    /// Set the charge limit; `percent` is `0..=100`
    #[instrument(skip_all, fields(vehicle_id = %connection.vehicle_id(), percent = percent))]
    pub async fn set_charge_limit(
        &self,
        connection: &dyn VehicleConnection,
        percent: f64,
    ) -> EngineResult<ChargeLimitOutcome> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(EngineError::InvalidCommand(format!(
                "Charge limit must be between 0 and 100, got {}",
                percent
            )));
        }

        let ack = connection.set_charge_limit(percent / 100.0).await?;
        Ok(ChargeLimitOutcome {
            limit: percent,
            message: ack.message().to_string(),
        })
    }

    /// Set the charging current on the make's amperage endpoint
    #[instrument(skip_all, fields(vehicle_id = %connection.vehicle_id(), make = ?make, amperage = amperage))]
    pub async fn set_amperage(
        &self,
        connection: &dyn VehicleConnection,
        make: Option<&str>,
        amperage: f64,
    ) -> EngineResult<AmperageOutcome> {
        if !amperage.is_finite() || amperage < 0.0 {
            return Err(EngineError::InvalidCommand(format!(
                "Amperage must be a non-negative number, got {}",
                amperage
            )));
        }

        let definition = self.registry().lookup(AMPERAGE_PROPERTY)?;
        let endpoint = definition.resolve(make)?.ok_or_else(|| {
            EngineError::InvalidCommand(format!(
                "Setting amperage is not supported for make {}",
                make.unwrap_or_default()
            ))
        })?;

        let ack = connection
            .command(&endpoint, json!({ "amperage": amperage }))
            .await?;
        Ok(AmperageOutcome {
            amperage,
            message: ack.message().to_string(),
        })
    }

    /// Lock or unlock the doors
    #[instrument(skip_all, fields(vehicle_id = %connection.vehicle_id(), %action))]
    pub async fn security(
        &self,
        connection: &dyn VehicleConnection,
        action: SecurityAction,
    ) -> EngineResult<CommandOutcome> {
        let ack = connection.security(action).await?;
        Ok(CommandOutcome {
            message: ack.message().to_string(),
        })
    }

    /// Revoke access to one vehicle
    #[instrument(skip_all, fields(vehicle_id = %connection.vehicle_id()))]
    pub async fn disconnect(&self, connection: &dyn VehicleConnection) -> EngineResult<()> {
        connection.disconnect().await?;
        info!("Vehicle disconnected");
        Ok(())
    }

    /// Revoke access to every vehicle of a token.
    ///
    /// Fails only when the vehicles cannot be listed; individual failures
    /// are collected in the report.
    #[instrument(skip_all)]
    pub async fn disconnect_all(
        &self,
        provider: &dyn ConnectionProvider,
        access_token: &str,
        unit_system: UnitSystem,
    ) -> EngineResult<DisconnectReport> {
        let ids = provider.list_vehicles(access_token).await?;
        let connections: Vec<Arc<dyn VehicleConnection>> = ids
            .iter()
            .map(|id| provider.connect(id, access_token, unit_system))
            .collect();

        let mut report = DisconnectReport::default();
        for (id, result) in disconnect_each(&connections).await {
            match result {
                Ok(()) => report.disconnected.push(id),
                Err(e) => report.failed.push(DisconnectFailure {
                    id,
                    error: e.into_typed(),
                }),
            }
        }

        info!(
            disconnected = report.disconnected.len(),
            failed = report.failed.len(),
            "Disconnected vehicles"
        );
        Ok(report)
    }
}
