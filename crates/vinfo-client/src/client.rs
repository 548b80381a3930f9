//! Vehicle-data API HTTP client implementation

use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, instrument};
use url::Url;
use vinfo_core::{ChargeAction, CommandAck, SecurityAction, UnitSystem};

use crate::error::{Result, VehicleApiError};
use crate::types::*;

/// Header selecting the unit system of measured values
pub const UNIT_SYSTEM_HEADER: &str = "sc-unit-system";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Vehicle-data REST API client
///
/// Every call carries the caller's access token; the client itself holds
/// no credentials and can be shared across requests.
#[derive(Debug, Clone)]
pub struct VehicleApiClient {
    client: Client,
    base_url: Url,
}

impl VehicleApiClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://api.smartcar.com/v2.0")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(VehicleApiError::ParseError(format!(
                "Base URL cannot have paths: {}",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // =========================================================================
    // Vehicles
    // =========================================================================

    /// List the ids of the vehicles the token grants access to
    #[instrument(skip(self, access_token))]
    pub async fn list_vehicles(&self, access_token: &str) -> Result<VehicleList> {
        let url = self.url(&["vehicles"])?;
        debug!("Listing vehicles from {}", url);

        let request = self.client.get(url);
        self.send(authorized(request, access_token)?).await
    }

    /// Fetch a vehicle's identifying attributes
    #[instrument(skip(self, access_token))]
    pub async fn get_attributes(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleAttributesResponse> {
        let url = self.url(&["vehicles", vehicle_id])?;

        let request = self.client.get(url);
        self.send(authorized(request, access_token)?).await
    }

    /// Issue several reads as one batch request
    #[instrument(skip(self, access_token, paths), fields(requests = paths.len()))]
    pub async fn batch<S: AsRef<str>>(
        &self,
        vehicle_id: &str,
        access_token: &str,
        unit_system: UnitSystem,
        paths: &[S],
    ) -> Result<BatchResponse> {
        let url = self.url(&["vehicles", vehicle_id, "batch"])?;
        debug!("Sending batch to {}", url);

        let request = self
            .client
            .post(url)
            .header(UNIT_SYSTEM_HEADER, unit_system.as_str())
            .json(&BatchRequest::new(paths));
        self.send(authorized(request, access_token)?).await
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Start or stop charging
    #[instrument(skip(self, access_token))]
    pub async fn charge(
        &self,
        vehicle_id: &str,
        access_token: &str,
        action: ChargeAction,
    ) -> Result<CommandAck> {
        let body = ActionRequest::new(action.as_str());
        self.post_command(vehicle_id, access_token, &["charge"], &body)
            .await
    }

    /// Set the charge limit as a fraction of capacity
    #[instrument(skip(self, access_token))]
    pub async fn set_charge_limit(
        &self,
        vehicle_id: &str,
        access_token: &str,
        fraction: f64,
    ) -> Result<CommandAck> {
        let body = ChargeLimitRequest { limit: fraction };
        self.post_command(vehicle_id, access_token, &["charge", "limit"], &body)
            .await
    }

    /// Lock or unlock the doors
    #[instrument(skip(self, access_token))]
    pub async fn security(
        &self,
        vehicle_id: &str,
        access_token: &str,
        action: SecurityAction,
    ) -> Result<CommandAck> {
        let body = ActionRequest::new(action.as_str());
        self.post_command(vehicle_id, access_token, &["security"], &body)
            .await
    }

    /// POST `body` to an arbitrary vehicle path such as `/tesla/charge/ammeter`
    #[instrument(skip(self, access_token, body))]
    pub async fn command(
        &self,
        vehicle_id: &str,
        access_token: &str,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<CommandAck> {
        let path: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.post_command(vehicle_id, access_token, &path, body).await
    }

    /// Revoke this application's access to a vehicle
    #[instrument(skip(self, access_token))]
    pub async fn disconnect(&self, vehicle_id: &str, access_token: &str) -> Result<()> {
        let url = self.url(&["vehicles", vehicle_id, "application"])?;
        debug!("Disconnecting via {}", url);

        let request = self.client.delete(url);
        let _: serde_json::Value = self.send(authorized(request, access_token)?).await?;
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn post_command<B: serde::Serialize>(
        &self,
        vehicle_id: &str,
        access_token: &str,
        path: &[&str],
        body: &B,
    ) -> Result<CommandAck> {
        let mut segments = vec!["vehicles", vehicle_id];
        segments.extend_from_slice(path);
        let url = self.url(&segments)?;
        debug!("Sending command to {}", url);

        let request = self.client.post(url).json(body);
        self.send(authorized(request, access_token)?).await
    }

    /// Append path segments to the base URL, escaping each segment
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| VehicleApiError::ParseError(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(VehicleApiError::from_send)?;
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| VehicleApiError::ParseError(e.to_string()))
        } else {
            Err(self.extract_error(response, status).await)
        }
    }

    async fn extract_error(&self, response: reqwest::Response, status: StatusCode) -> VehicleApiError {
        let error = match response.json::<serde_json::Value>().await {
            Ok(body) => VendorError::from_value(&body),
            Err(_) => VendorError::default(),
        };
        debug!(status = status.as_u16(), error_type = ?error.error_type, "Vehicle API returned an error");
        VehicleApiError::api(status.as_u16(), error)
    }
}

fn authorized(request: RequestBuilder, access_token: &str) -> Result<RequestBuilder> {
    let value = HeaderValue::from_str(&format!("Bearer {}", access_token))
        .map_err(|e| VehicleApiError::ParseError(format!("Invalid access token: {}", e)))?;
    Ok(request.header(AUTHORIZATION, value))
}
