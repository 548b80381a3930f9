//! TOML configuration for vinfod
//!
//! Every section is optional; a missing file section falls back to the
//! defaults below.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use vinfo_core::UnitSystem;
use vinfo_props::{PropertyEntry, PropertyRegistry, PropsResult};

/// Default vehicle-data API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.smartcar.com/v2.0";

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub vehicle_api: VehicleApiConfig,
    pub defaults: DefaultsConfig,
    /// Additions to / replacements of the built-in property registry
    pub properties: Vec<PropertyEntry>,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Vehicle-data API client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VehicleApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Engine-side limit for one batch; unset means the client timeout applies
    pub batch_timeout_secs: Option<u64>,
}

impl Default for VehicleApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            batch_timeout_secs: None,
        }
    }
}

impl VehicleApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn batch_timeout(&self) -> Option<Duration> {
        self.batch_timeout_secs.map(Duration::from_secs)
    }
}

/// Request defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub unit_system: UnitSystem,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Built-in registry with the configured properties applied
    pub fn build_registry(&self) -> PropsResult<PropertyRegistry> {
        let mut registry = PropertyRegistry::builtin();
        registry.load_entries(self.properties.iter().cloned())?;
        Ok(registry)
    }

    /// Address the HTTP server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid listen address: {}:{}",
                    self.server.host, self.server.port
                )
            })
    }
}
