//! vinfod - Vehicle-info Server Daemon
//!
//! Serves aggregated vehicle information over HTTP, reading from the
//! third-party vehicle-data API with each caller's own access token.
//!
//! Usage:
//!   vinfod [OPTIONS]
//!
//! Without `--config` the built-in defaults are used.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vinfo_api::{create_router, AppState};
use vinfo_client::VehicleApiClient;
use vinfo_engine::{BatchExecutor, VehicleInfoService};
use vinfo_proxy::HttpConnectionProvider;

use crate::config::Config;

const DEFAULT_LOG_FILTER: &str = "vinfod=info,vinfo_api=info,vinfo_engine=info,vinfo_proxy=info";

#[derive(Parser)]
#[command(name = "vinfod")]
#[command(version, about = "Vehicle-info aggregation server")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "VINFOD_CONFIG")]
    config: Option<PathBuf>,

    /// Listen host (overrides config)
    #[arg(long, env = "VINFOD_HOST")]
    host: Option<String>,

    /// Listen port (overrides config)
    #[arg(short, long, env = "VINFOD_PORT")]
    port: Option<u16>,

    /// Vehicle-data API base URL (overrides config)
    #[arg(long, env = "VINFOD_API_BASE_URL")]
    api_base_url: Option<String>,

    /// Log output format
    #[arg(long, value_enum, env = "VINFOD_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// Load the config file (or defaults) and apply command-line overrides
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.api_base_url {
            config.vehicle_api.base_url = url.clone();
        }

        Ok(config)
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    tracing::info!("Starting vinfod (Vehicle-info Server Daemon)");

    let config = cli.resolve_config()?;
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from: {}", path.display());
    }

    let registry = config
        .build_registry()
        .context("Failed to build property registry")?;
    tracing::info!(properties = registry.len(), "Property registry ready");

    let client = VehicleApiClient::with_config(
        &config.vehicle_api.base_url,
        config.vehicle_api.timeout(),
        config.vehicle_api.connect_timeout(),
    )
    .with_context(|| format!("Invalid vehicle API URL: {}", config.vehicle_api.base_url))?;
    tracing::info!(base_url = %client.base_url(), "Using vehicle-data API");

    let mut service = VehicleInfoService::new(Arc::new(registry));
    if let Some(timeout) = config.vehicle_api.batch_timeout() {
        service = service.with_executor(BatchExecutor::with_timeout(timeout));
    }

    let state = AppState::new(service, Arc::new(HttpConnectionProvider::new(client)))
        .with_default_unit_system(config.defaults.unit_system);
    let app = create_router(state);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cli_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nhost = \"127.0.0.1\"\nport = 9000\n\n[vehicle_api]\nbase_url = \"http://file\""
        )
        .unwrap();

        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "vinfod",
            "--config",
            path.as_str(),
            "--port",
            "9100",
            "--api-base-url",
            "http://cli",
        ])
        .unwrap();

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.vehicle_api.base_url, "http://cli");
    }

    #[test]
    fn defaults_without_config() {
        let cli = Cli::try_parse_from(["vinfod", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.server.port, 8000);
    }
}
