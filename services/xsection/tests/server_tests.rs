//! End-to-end HTTP tests against a mock EDR server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query},
    http::header,
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use serde_json::Value;
use test_utils::edr::INSTANCES;
use test_utils::paths::SHORT_PATH;
use test_utils::trajectory_collection;
use xsection::config::{ServiceDefinition, XsectionConfig};
use xsection::pipeline::RenderSettings;
use xsection::state::AppState;

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn instances() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], INSTANCES)
}

async fn trajectory(
    Extension(seen): Extension<Seen>,
    Path(_instance): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let parameter = params
        .get("parameter-name")
        .cloned()
        .unwrap_or_else(|| "Temperature".to_string());
    if let Ok(mut seen) = seen.lock() {
        seen.push(params);
    }

    let xs: Vec<f64> = (7..=22).map(f64::from).collect();
    let zs = [300.0, 500.0, 850.0, 1000.0];
    let body = trajectory_collection(&parameter, &xs, &zs, |x, z| Some(z / 20.0 - x));
    ([(header::CONTENT_TYPE, "application/prs.coverage+json")], body)
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a mock EDR server and the cross-section server pointed at it.
async fn start() -> (String, Seen) {
    let seen: Seen = Arc::default();
    let mock = Router::new()
        .route("/collections/test/instances", get(instances))
        .route(
            "/collections/test/instances/:instance/trajectory",
            get(trajectory),
        )
        .layer(Extension(seen.clone()));
    let mock_addr = spawn(mock).await;

    let config = XsectionConfig {
        services: vec![ServiceDefinition {
            id: "test".to_string(),
            title: "Mock collection".to_string(),
            url: format!("http://{}/collections/test", mock_addr),
        }],
        request_timeout_secs: 5,
        render: RenderSettings {
            seed: Some(1),
            ..RenderSettings::default()
        },
        ..XsectionConfig::default()
    };
    let state = Arc::new(AppState::new(config).unwrap());
    let addr = spawn(xsection::router(state)).await;

    (format!("http://{}", addr), seen)
}

// ============================================================================
// Metadata
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (base, _) = start().await;
    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_collections() {
    let (base, _) = start().await;
    let body: Value = reqwest::get(format!("{}/collections", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let collections = body["collections"].as_array().unwrap();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0]["id"], "test");
}

#[tokio::test]
async fn test_parameters_of_latest_instance() {
    let (base, _) = start().await;
    let response = reqwest::get(format!("{}/collections/test/parameters", base))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["instance"], "20241229T120000");
    assert_eq!(body["datetime"], "2024-12-29T12:00:00Z");
    assert_eq!(body["levels"], "300,500,850,1000");

    let ids: Vec<&str> = body["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["Humidity", "Temperature"]);
    assert_eq!(body["parameters"][0]["label"], "Relative humidity");
}

#[tokio::test]
async fn test_unknown_collection() {
    let (base, _) = start().await;
    let response = reqwest::get(format!("{}/collections/nope/parameters", base))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], 404);
}

// ============================================================================
// Cross-sections
// ============================================================================

#[tokio::test]
async fn test_cross_section_svg() {
    let (base, seen) = start().await;
    let response = reqwest::Client::new()
        .get(format!("{}/collections/test/cross-section", base))
        .query(&[("parameter", "Temperature"), ("coords", SHORT_PATH)])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "image/svg+xml"
    );
    let svg = response.text().await.unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("<path"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let query = &seen[0];
    assert_eq!(query["parameter-name"], "Temperature");
    assert_eq!(query["datetime"], "2024-12-29T12:00:00Z");
    assert_eq!(query["crs"], "CRS:84");
    assert_eq!(query["coords"], SHORT_PATH);
    assert_eq!(query["z"], "300,500,850,1000");
    assert_eq!(query["f"], "CoverageJSON");
}

#[tokio::test]
async fn test_cross_section_json_defaults() {
    let (base, seen) = start().await;
    let body: Value = reqwest::get(format!(
        "{}/collections/test/cross-section?format=json&threshold=20",
        base
    ))
    .await
    .unwrap()
    .json()
    .await
    .unwrap();

    assert_eq!(body["instance"], "20241229T120000");
    assert_eq!(body["parameter"], "Humidity");
    assert_eq!(body["width"], 16);
    assert_eq!(body["height"], 4);
    assert!(!body["thresholds"].as_array().unwrap().is_empty());
    let labels = body["labels"].as_array().unwrap().len() as u64;
    assert!(labels <= body["candidates"].as_u64().unwrap());

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0]["parameter-name"], "Humidity");
    assert!(seen[0]["coords"].starts_with("LINESTRING(7 66.2,8 66.2"));
}

#[tokio::test]
async fn test_cross_section_png() {
    let (base, _) = start().await;
    let response = reqwest::get(format!(
        "{}/collections/test/cross-section?format=png",
        base
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 200);
    let bytes = response.bytes().await.unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn test_cross_section_rejects_bad_input() {
    let (base, seen) = start().await;

    let response = reqwest::get(format!(
        "{}/collections/test/cross-section?format=gif",
        base
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 400);

    let response = reqwest::get(format!(
        "{}/collections/test/cross-section?parameter=Pressure",
        base
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 404);

    let response = reqwest::Client::new()
        .get(format!("{}/collections/test/cross-section", base))
        .query(&[("coords", "POINT(1 2)")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    assert!(seen.lock().unwrap().is_empty());
}

// ============================================================================
// Path editing
// ============================================================================

#[tokio::test]
async fn test_translate_path() {
    let (base, _) = start().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{}/path/translate", base))
        .json(&serde_json::json!({ "coords": SHORT_PATH, "dlon": 1.0, "dlat": -0.2 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["waypoints"], 3);
    assert!(body["coords"].as_str().unwrap().starts_with("LINESTRING(8 66"));

    let response = client
        .post(format!("{}/path/translate", base))
        .json(&serde_json::json!({ "coords": SHORT_PATH, "dlat": 30.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}
