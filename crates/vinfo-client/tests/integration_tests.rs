//! Integration tests for vinfo-client
//!
//! These tests serve a small fake of the vehicle-data API and point the
//! client at it, checking request shape and error mapping.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use vinfo_client::testing::TestServer;
use vinfo_client::{VehicleApiError, UNIT_SYSTEM_HEADER};
use vinfo_core::{ChargeAction, SecurityAction, UnitSystem, COMMAND_SENT_MESSAGE};

// =============================================================================
// Fake API
// =============================================================================

#[derive(Clone, Default)]
struct Recorded {
    unit_systems: Arc<Mutex<Vec<String>>>,
    batch_bodies: Arc<Mutex<Vec<Value>>>,
    commands: Arc<Mutex<Vec<(String, Value)>>>,
    disconnected: Arc<Mutex<Vec<String>>>,
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "type": "AUTHENTICATION",
            "description": "The provided access token is invalid",
            "statusCode": 401
        })),
    )
        .into_response()
}

async fn list_vehicles(headers: HeaderMap) -> Response {
    if bearer(&headers) != Some("token-1") {
        return unauthorized();
    }
    Json(json!({"vehicles": ["veh-1", "veh 2"], "paging": {"count": 2, "offset": 0}})).into_response()
}

async fn attributes(Path(id): Path<String>, headers: HeaderMap) -> Response {
    if bearer(&headers) != Some("token-1") {
        return unauthorized();
    }
    match id.as_str() {
        "veh-1" => Json(json!({
            "id": "veh-1", "make": "TESLA", "model": "Model 3", "year": 2019,
            "meta": {"requestId": "r1"}
        }))
        .into_response(),
        "veh 2" => (StatusCode::CONFLICT, Json(json!({"type": "VEHICLE_STATE", "message": "asleep"})))
            .into_response(),
        _ => (StatusCode::NOT_FOUND, "no such vehicle").into_response(),
    }
}

async fn batch(
    State(recorded): State<Recorded>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if bearer(&headers) != Some("token-1") {
        return unauthorized();
    }
    if let Some(unit) = headers.get(UNIT_SYSTEM_HEADER).and_then(|v| v.to_str().ok()) {
        recorded.unit_systems.lock().push(unit.to_string());
    }
    recorded.batch_bodies.lock().push(body.clone());

    let responses: Vec<Value> = body["requests"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|req| {
            let path = req["path"].as_str().unwrap_or_default();
            match path {
                "/odometer" => json!({"path": path, "code": 200, "body": {"distance": 1042.5}}),
                _ => json!({"path": path, "code": 404, "body": {"type": "RESOURCE_NOT_FOUND"}}),
            }
        })
        .collect();
    Json(json!({"vehicle": id, "responses": responses})).into_response()
}

async fn command(
    State(recorded): State<Recorded>,
    Path((_id, path)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if bearer(&headers) != Some("token-1") {
        return unauthorized();
    }
    let path = format!("/{}", path);
    recorded.commands.lock().push((path.clone(), body.clone()));

    if path == "/security" && body["action"] == "UNLOCK" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"type": "VEHICLE_STATE", "description": "Vehicle is in motion"})),
        )
            .into_response();
    }
    if path == "/charge/limit" {
        return Json(json!({"status": "success", "message": "Limit updated"})).into_response();
    }
    Json(json!({"status": "success"})).into_response()
}

async fn disconnect(
    State(recorded): State<Recorded>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if bearer(&headers) != Some("token-1") {
        return unauthorized();
    }
    recorded.disconnected.lock().push(id);
    Json(json!({"status": "success"})).into_response()
}

fn fake_api(recorded: Recorded) -> Router {
    Router::new()
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles/{id}", get(attributes))
        .route("/vehicles/{id}/batch", post(batch))
        .route("/vehicles/{id}/application", delete(disconnect))
        .route("/vehicles/{id}/{*path}", post(command))
        .with_state(recorded)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn lists_vehicles_with_token() {
    let server = TestServer::start(fake_api(Recorded::default())).await.unwrap();

    let list = server.client.list_vehicles("token-1").await.unwrap();

    assert_eq!(list.vehicles, vec!["veh-1", "veh 2"]);
    assert_eq!(list.paging.count, 2);
}

#[tokio::test]
async fn bad_token_maps_to_api_error() {
    let server = TestServer::start(fake_api(Recorded::default())).await.unwrap();

    let err = server.client.list_vehicles("nope").await.unwrap_err();

    match err {
        VehicleApiError::Api { status, error } => {
            assert_eq!(status, 401);
            assert_eq!(error.error_type.as_deref(), Some("AUTHENTICATION"));
            assert_eq!(error.message(), "The provided access token is invalid");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn reads_attributes() {
    let server = TestServer::start(fake_api(Recorded::default())).await.unwrap();

    let attrs = server.client.get_attributes("veh-1", "token-1").await.unwrap();

    assert_eq!(attrs.make, "TESLA");
    assert_eq!(attrs.year, 2019);
    assert!(attrs.meta.is_some());
}

#[tokio::test]
async fn escapes_vehicle_ids() {
    let server = TestServer::start(fake_api(Recorded::default())).await.unwrap();

    let err = server.client.get_attributes("veh 2", "token-1").await.unwrap_err();

    assert!(matches!(err, VehicleApiError::Api { status: 409, .. }));
    assert!(err.to_string().contains("asleep"));
}

#[tokio::test]
async fn non_json_error_body_still_maps() {
    let server = TestServer::start(fake_api(Recorded::default())).await.unwrap();

    let err = server.client.get_attributes("unknown", "token-1").await.unwrap_err();

    match err {
        VehicleApiError::Api { status, error } => {
            assert_eq!(status, 404);
            assert_eq!(error.error_type, None);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn batch_sends_paths_and_unit_system() {
    let recorded = Recorded::default();
    let server = TestServer::start(fake_api(recorded.clone())).await.unwrap();

    let response = server
        .client
        .batch("veh-1", "token-1", UnitSystem::Metric, &["/odometer", "/vin"])
        .await
        .unwrap();

    assert_eq!(response.responses.len(), 2);
    assert!(response.responses[0].is_success());
    assert_eq!(response.responses[0].body, json!({"distance": 1042.5}));
    assert_eq!(response.responses[1].code, 404);

    assert_eq!(recorded.unit_systems.lock().clone(), vec!["metric"]);
    assert_eq!(
        recorded.batch_bodies.lock()[0],
        json!({"requests": [{"path": "/odometer"}, {"path": "/vin"}]})
    );
}

#[tokio::test]
async fn keeps_versioned_base_path() {
    let server = TestServer::start_nested("/v2.0", fake_api(Recorded::default()))
        .await
        .unwrap();
    assert_eq!(server.api_url(), format!("{}/v2.0", server.base_url()));

    let attrs = server.client.get_attributes("veh-1", "token-1").await.unwrap();

    assert_eq!(attrs.id, "veh-1");
}

#[tokio::test]
async fn commands_post_their_bodies() {
    let recorded = Recorded::default();
    let server = TestServer::start(fake_api(recorded.clone())).await.unwrap();

    let ack = server
        .client
        .charge("veh-1", "token-1", ChargeAction::Start)
        .await
        .unwrap();
    assert_eq!(ack.message(), COMMAND_SENT_MESSAGE);

    let ack = server
        .client
        .set_charge_limit("veh-1", "token-1", 0.8)
        .await
        .unwrap();
    assert_eq!(ack.message(), "Limit updated");

    server
        .client
        .command("veh-1", "token-1", "/tesla/charge/ammeter", &json!({"amperage": 16}))
        .await
        .unwrap();

    assert_eq!(
        recorded.commands.lock().clone(),
        vec![
            ("/charge".to_string(), json!({"action": "START"})),
            ("/charge/limit".to_string(), json!({"limit": 0.8})),
            ("/tesla/charge/ammeter".to_string(), json!({"amperage": 16})),
        ]
    );
}

#[tokio::test]
async fn rejected_command_maps_to_api_error() {
    let server = TestServer::start(fake_api(Recorded::default())).await.unwrap();

    let err = server
        .client
        .security("veh-1", "token-1", SecurityAction::Unlock)
        .await
        .unwrap_err();

    match err {
        VehicleApiError::Api { status, error } => {
            assert_eq!(status, 409);
            assert_eq!(error.message(), "Vehicle is in motion");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn disconnect_deletes_the_application_grant() {
    let recorded = Recorded::default();
    let server = TestServer::start(fake_api(recorded.clone())).await.unwrap();

    server.client.disconnect("veh-1", "token-1").await.unwrap();

    assert_eq!(recorded.disconnected.lock().clone(), vec!["veh-1"]);
}
