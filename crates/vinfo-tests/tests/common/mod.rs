//! Shared harness: fake vehicle-data API plus a running vinfo-api server

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use vinfo_api::{create_router, AppState};
use vinfo_client::testing::TestServer;
use vinfo_client::UNIT_SYSTEM_HEADER;
use vinfo_engine::VehicleInfoService;
use vinfo_props::PropertyRegistry;
use vinfo_proxy::HttpConnectionProvider;

pub const TOKEN: &str = "valid-token";

// =============================================================================
// Fake vehicle-data API
// =============================================================================

/// One vehicle known to the fake API
#[derive(Clone, Default)]
pub struct FakeVehicle {
    /// `None` makes the attributes call fail with VEHICLE_STATE
    pub make: Option<String>,
    /// path -> (status code, body)
    pub endpoints: HashMap<String, (u16, Value)>,
    /// When set, the whole batch call fails with this status and body
    pub batch_failure: Option<(u16, Value)>,
    /// When set, commands and disconnects fail with this status and body
    pub command_failure: Option<(u16, Value)>,
}

impl FakeVehicle {
    pub fn new(make: &str) -> Self {
        Self {
            make: Some(make.to_string()),
            ..Default::default()
        }
    }

    pub fn asleep() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, body: Value) -> Self {
        self.endpoints.insert(path.to_string(), (200, body));
        self
    }

    pub fn with_error(mut self, path: &str, code: u16, error_type: &str, description: &str) -> Self {
        self.endpoints.insert(
            path.to_string(),
            (code, json!({"type": error_type, "description": description})),
        );
        self
    }

    pub fn failing_batches(mut self, code: u16, body: Value) -> Self {
        self.batch_failure = Some((code, body));
        self
    }

    pub fn rejecting_commands(mut self, code: u16, error_type: &str, description: &str) -> Self {
        self.command_failure = Some((code, json!({"type": error_type, "description": description})));
        self
    }
}

/// A batch call as the fake API saw it
#[derive(Debug, Clone)]
pub struct RecordedBatch {
    pub vehicle_id: String,
    pub paths: Vec<String>,
    pub unit_system: Option<String>,
}

/// A command as the fake API saw it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCommand {
    pub vehicle_id: String,
    pub path: String,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct FakeVendor {
    /// Listing order matters, so keep ids in a Vec
    pub vehicles: Arc<Vec<(String, FakeVehicle)>>,
    pub batches: Arc<Mutex<Vec<RecordedBatch>>>,
    pub commands: Arc<Mutex<Vec<RecordedCommand>>>,
    pub disconnected: Arc<Mutex<Vec<String>>>,
}

impl FakeVendor {
    pub fn new(vehicles: Vec<(&str, FakeVehicle)>) -> Self {
        Self {
            vehicles: Arc::new(
                vehicles
                    .into_iter()
                    .map(|(id, v)| (id.to_string(), v))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn vehicle(&self, id: &str) -> Option<&FakeVehicle> {
        self.vehicles.iter().find(|(vid, _)| vid == id).map(|(_, v)| v)
    }

    pub fn recorded_batches(&self) -> Vec<RecordedBatch> {
        self.batches.lock().clone()
    }

    pub fn recorded_commands(&self) -> Vec<RecordedCommand> {
        self.commands.lock().clone()
    }

    pub fn disconnected(&self) -> Vec<String> {
        self.disconnected.lock().clone()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/vehicles", get(list_vehicles))
            .route("/vehicles/{id}", get(get_attributes))
            .route("/vehicles/{id}/batch", post(batch))
            .route("/vehicles/{id}/application", delete(disconnect))
            .route("/vehicles/{id}/{*path}", post(command))
            .with_state(self.clone())
    }
}

fn authorized(headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if token == Some(TOKEN) {
        return Ok(());
    }
    Err((
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "type": "AUTHENTICATION",
            "description": "The provided access token is invalid or expired",
            "statusCode": 401
        })),
    )
        .into_response())
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"type": "RESOURCE_NOT_FOUND", "description": "Unknown vehicle"})),
    )
        .into_response()
}

async fn list_vehicles(State(vendor): State<FakeVendor>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorized(&headers) {
        return resp;
    }
    let ids: Vec<&str> = vendor.vehicles.iter().map(|(id, _)| id.as_str()).collect();
    Json(json!({"vehicles": ids, "paging": {"count": ids.len(), "offset": 0}})).into_response()
}

async fn get_attributes(
    State(vendor): State<FakeVendor>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = authorized(&headers) {
        return resp;
    }
    let Some(vehicle) = vendor.vehicle(&id) else {
        return not_found();
    };
    match &vehicle.make {
        Some(make) => Json(json!({
            "id": id,
            "make": make,
            "model": "Test Model",
            "year": 2021,
            "meta": {"requestId": "fake"}
        }))
        .into_response(),
        None => (
            StatusCode::CONFLICT,
            Json(json!({"type": "VEHICLE_STATE", "description": "Vehicle is asleep"})),
        )
            .into_response(),
    }
}

async fn batch(
    State(vendor): State<FakeVendor>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&headers) {
        return resp;
    }
    let Some(vehicle) = vendor.vehicle(&id) else {
        return not_found();
    };

    let paths: Vec<String> = body["requests"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|r| r["path"].as_str().map(str::to_string))
        .collect();
    vendor.batches.lock().push(RecordedBatch {
        vehicle_id: id.clone(),
        paths: paths.clone(),
        unit_system: headers
            .get(UNIT_SYSTEM_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    if let Some((code, body)) = &vehicle.batch_failure {
        let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(body.clone())).into_response();
    }

    let responses: Vec<Value> = paths
        .iter()
        .map(|path| match vehicle.endpoints.get(path) {
            Some((code, body)) => json!({"path": path, "code": code, "body": body}),
            None => json!({
                "path": path,
                "code": 501,
                "body": {"type": "COMPATIBILITY", "description": "Not supported by this vehicle"}
            }),
        })
        .collect();
    Json(json!({"responses": responses})).into_response()
}

fn failure(code: u16, body: &Value) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body.clone())).into_response()
}

async fn command(
    State(vendor): State<FakeVendor>,
    Path((id, path)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&headers) {
        return resp;
    }
    let Some(vehicle) = vendor.vehicle(&id) else {
        return not_found();
    };
    if let Some((code, body)) = &vehicle.command_failure {
        return failure(*code, body);
    }

    vendor.commands.lock().push(RecordedCommand {
        vehicle_id: id,
        path: format!("/{}", path),
        body,
    });
    Json(json!({"status": "success"})).into_response()
}

async fn disconnect(
    State(vendor): State<FakeVendor>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = authorized(&headers) {
        return resp;
    }
    let Some(vehicle) = vendor.vehicle(&id) else {
        return not_found();
    };
    if let Some((code, body)) = &vehicle.command_failure {
        return failure(*code, body);
    }

    vendor.disconnected.lock().push(id);
    Json(json!({"status": "success"})).into_response()
}

// =============================================================================
// Stack
// =============================================================================

/// Fake vendor API and vinfo-api server running side by side
pub struct Stack {
    pub vendor: FakeVendor,
    pub api: TestServer,
    pub http: reqwest::Client,
    _vendor_server: TestServer,
}

impl Stack {
    pub async fn start(vendor: FakeVendor) -> Self {
        let vendor_server = TestServer::start_nested("/v2.0", vendor.router())
            .await
            .expect("start fake vendor API");

        let client = vendor_server.client.clone();
        let service = VehicleInfoService::new(Arc::new(PropertyRegistry::builtin()));
        let state = AppState::new(service, Arc::new(HttpConnectionProvider::new(client)));
        let api = TestServer::start(create_router(state))
            .await
            .expect("start vinfo API");

        Self {
            vendor,
            api,
            http: reqwest::Client::new(),
            _vendor_server: vendor_server,
        }
    }

    /// GET `path_and_query` on the vinfo API, returning status and JSON body
    pub async fn get(&self, path_and_query: &str, token: Option<&str>) -> (u16, Value) {
        let mut request = self
            .http
            .get(format!("{}{}", self.api.base_url(), path_and_query));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::finish(request).await
    }

    /// POST `body` to `path_and_query` with the valid token
    pub async fn post(&self, path_and_query: &str, body: Value) -> (u16, Value) {
        let request = self
            .http
            .post(format!("{}{}", self.api.base_url(), path_and_query))
            .bearer_auth(TOKEN)
            .json(&body);
        Self::finish(request).await
    }

    /// DELETE `path_and_query` with the valid token
    pub async fn delete(&self, path_and_query: &str) -> (u16, Value) {
        let request = self
            .http
            .delete(format!("{}{}", self.api.base_url(), path_and_query))
            .bearer_auth(TOKEN);
        Self::finish(request).await
    }

    async fn finish(request: reqwest::RequestBuilder) -> (u16, Value) {
        let response = request.send().await.expect("request vinfo API");
        let status = response.status().as_u16();
        let body = response.json().await.unwrap_or(Value::Null);
        (status, body)
    }
}
