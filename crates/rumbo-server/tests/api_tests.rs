//! Integration tests for the REST API.
//!
//! Tests drive the Axum `Router` directly via `tower::ServiceExt`
//! without starting a TCP server, validating handler logic, routing,
//! and the JSON shapes on the wire.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use rumbo_server::hub::Hub;
use rumbo_server::router::build_router;
use rumbo_server::state::AppState;
use rumbo_store::Store;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    state: Arc<AppState>,
    // Keeps the hub's event queue alive; no consumer runs in these tests.
    _events: tokio::sync::mpsc::UnboundedReceiver<rumbo_server::hub::HubEvent>,
}

fn make_app() -> TestApp {
    let store = Arc::new(Store::new());
    let (hub, events) = Hub::new(Arc::clone(&store));
    TestApp {
        state: Arc::new(AppState::new(store, hub)),
        _events: events,
    }
}

fn post_json(path: &str, body: &Value) -> Request<Body> {
    Request::post(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn index_returns_html() {
    let app = make_app();
    let router = build_router(app.state.clone());

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn create_user_assigns_first_id() {
    let app = make_app();
    let router = build_router(app.state.clone());

    let response = router
        .oneshot(post_json(
            "/api/users",
            &json!({"username": "ana", "lat": 14.0818, "lng": -87.2068}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_to_json(response.into_body()).await;
    assert_eq!(user["id"], 1);
    assert_eq!(user["username"], "ana");
}

#[tokio::test]
async fn empty_username_is_rejected() {
    let app = make_app();
    let router = build_router(app.state.clone());

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/users",
            &json!({"username": "", "lat": 14.0, "lng": -87.0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_to_json(response.into_body()).await;
    assert_eq!(error["status"], 400);

    // The failed mutation must not have registered anyone.
    let response = router
        .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let stats = body_to_json(response.into_body()).await;
    assert_eq!(stats["users_online"], 0);
}

#[tokio::test]
async fn create_and_list_reports() {
    let app = make_app();
    let router = build_router(app.state.clone());

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/reports",
            &json!({
                "type": "traffic",
                "lat": 14.0818,
                "lng": -87.2068,
                "description": "jam",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let report = body_to_json(response.into_body()).await;
    assert_eq!(report["id"], 1);
    assert_eq!(report["type"], "traffic");
    assert_eq!(report["votes"], 1);
    assert_eq!(report["user_id"], 1);

    let response = router
        .oneshot(Request::get("/api/reports").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_to_json(response.into_body()).await;
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["reports"][0]["description"], "jam");
}

#[tokio::test]
async fn unknown_report_kind_is_rejected() {
    let app = make_app();
    let router = build_router(app.state.clone());

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/reports",
            &json!({"type": "earthquake", "lat": 14.0, "lng": -87.0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .oneshot(Request::get("/api/reports").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let listing = body_to_json(response.into_body()).await;
    assert_eq!(listing["count"], 0);
}

#[tokio::test]
async fn seeded_reports_are_served() {
    let app = make_app();
    app.state.store.seed_sample_data().await;
    let router = build_router(app.state.clone());

    let response = router
        .oneshot(Request::get("/api/reports").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let listing = body_to_json(response.into_body()).await;
    assert_eq!(listing["count"], 3);
}

#[tokio::test]
async fn stats_include_congestion_summary() {
    let app = make_app();
    let router = build_router(app.state.clone());

    let response = router
        .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_to_json(response.into_body()).await;
    assert_eq!(stats["users_online"], 0);
    assert_eq!(stats["total_reports"], 0);
    assert_eq!(stats["traffic_points"], 0);
    assert_eq!(stats["congestion"]["low"], 0);
}

#[tokio::test]
async fn traffic_endpoint_serves_simulated_samples() {
    struct FixedTime;
    impl rumbo_traffic::TimeSource for FixedTime {
        fn local_hour(&self) -> u32 {
            12
        }
        fn unix_seconds(&self) -> i64 {
            10
        }
    }

    let app = make_app();
    rumbo_traffic::simulate_once(&app.state.store, &FixedTime).await;
    let router = build_router(app.state.clone());

    let response = router
        .oneshot(Request::get("/api/traffic").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let samples = body_to_json(response.into_body()).await;
    let map = samples.as_object().unwrap();
    assert_eq!(map.len(), 8);
    let central = &map["14.0818,-87.2068"];
    assert!(central["speed"].as_f64().unwrap() >= 5.0);
    assert!(["low", "medium", "high"].contains(&central["congestion"].as_str().unwrap()));
}

#[tokio::test]
async fn route_estimate_interpolates_eleven_points() {
    let app = make_app();
    let router = build_router(app.state.clone());

    let response = router
        .oneshot(post_json(
            "/api/routes",
            &json!({
                "from_lat": 14.0818,
                "from_lng": -87.2068,
                "to_lat": 14.0900,
                "to_lng": -87.2100,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let route = body_to_json(response.into_body()).await;
    assert_eq!(route["points"].as_array().unwrap().len(), 11);
    assert!(route["distance"].as_f64().unwrap() > 0.0);
    assert_eq!(route["from"]["lat"], 14.0818);
    assert_eq!(route["to"]["lng"], -87.2100);
}

#[tokio::test]
async fn route_with_invalid_coordinates_is_rejected() {
    let app = make_app();
    let router = build_router(app.state.clone());

    let response = router
        .oneshot(post_json(
            "/api/routes",
            &json!({
                "from_lat": 95.0,
                "from_lng": 0.0,
                "to_lat": 14.0,
                "to_lng": -87.0,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
