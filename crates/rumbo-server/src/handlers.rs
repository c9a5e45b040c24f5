//! REST API endpoint handlers.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `POST` | `/api/users` | Register a user at a position |
//! | `POST` | `/api/reports` | Submit a report |
//! | `GET` | `/api/reports` | Recent reports (last 24h) |
//! | `GET` | `/api/stats` | Counters + congestion summary |
//! | `GET` | `/api/traffic` | All traffic samples |
//! | `POST` | `/api/routes` | Straight-line route estimate |
//!
//! Mutating handlers call into the store first and only then ask the hub
//! to notify subscribers; there is no atomicity between the two, which is
//! the accepted best-effort freshness model.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use rumbo_geo::plan_route;
use rumbo_traffic::congestion_summary;
use rumbo_types::{Position, Report, Route, User};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Body for `POST /api/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Display name; must be non-empty.
    pub username: String,
    /// Latitude of the user's position.
    pub lat: f64,
    /// Longitude of the user's position.
    pub lng: f64,
}

/// Body for `POST /api/reports`.
#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    /// Report kind: `accident`, `police`, `traffic`, or `hazard`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Latitude of the incident.
    pub lat: f64,
    /// Longitude of the incident.
    pub lng: f64,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Submitting user id; defaults to 1 for anonymous submissions.
    #[serde(default = "default_user_id")]
    pub user_id: u64,
}

const fn default_user_id() -> u64 {
    1
}

/// Body for `POST /api/routes`.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin latitude.
    pub from_lat: f64,
    /// Origin longitude.
    pub from_lng: f64,
    /// Destination latitude.
    pub to_lat: f64,
    /// Destination longitude.
    pub to_lng: f64,
}

/// Response for `GET /api/reports`.
#[derive(Debug, Serialize)]
pub struct ReportsResponse {
    /// Number of reports returned.
    pub count: usize,
    /// The reports, in no particular order.
    pub reports: Vec<Report>,
}

/// Serve a minimal HTML status page with live counters.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let stats = state.store.stats().await;
    let subscribers = state.hub.subscriber_count();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Rumbo</title>
</head>
<body>
    <h1>Rumbo</h1>
    <p>Live traffic and road reports -- status page</p>
    <ul>
        <li>Users online: {users}</li>
        <li>Reports: {reports}</li>
        <li>Traffic points: {traffic}</li>
        <li>Push subscribers: {subscribers}</li>
    </ul>
    <p>API: <a href="/api/reports">/api/reports</a>,
       <a href="/api/stats">/api/stats</a>,
       <a href="/api/traffic">/api/traffic</a></p>
    <p>Push channel: <code>ws://host:port/ws</code></p>
</body>
</html>"#,
        users = stats.users_online,
        reports = stats.total_reports,
        traffic = stats.traffic_points,
    ))
}

/// Register (or re-register) a user and broadcast updated stats.
///
/// Re-registering an existing name deliberately creates a new id.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .store
        .create_user(&body.username, body.lat, body.lng)
        .await?;

    state.hub.broadcast_stats();

    Ok((StatusCode::CREATED, Json(user)))
}

/// Submit a report and broadcast it (followed by updated stats).
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let report = state
        .store
        .create_report(&body.kind, body.lat, body.lng, &body.description, body.user_id)
        .await?;

    state.hub.broadcast_new_report(report.clone());

    Ok((StatusCode::CREATED, Json(report)))
}

/// List reports from the last 24 hours.
pub async fn list_reports(State(state): State<Arc<AppState>>) -> Json<ReportsResponse> {
    let reports = state.store.recent_reports().await;
    Json(ReportsResponse {
        count: reports.len(),
        reports,
    })
}

/// Current counters plus a per-level congestion summary.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.store.stats().await;
    let congestion = congestion_summary(&state.store).await;

    Json(serde_json::json!({
        "users_online": stats.users_online,
        "total_reports": stats.total_reports,
        "traffic_points": stats.traffic_points,
        "congestion": congestion,
    }))
}

/// All current traffic samples keyed by quantized position.
pub async fn get_traffic(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.all_traffic_samples().await)
}

/// Estimate a straight-line route between two positions.
pub async fn create_route(
    Json(body): Json<RouteRequest>,
) -> Result<Json<Route>, ApiError> {
    let from = Position::new(body.from_lat, body.from_lng);
    let to = Position::new(body.to_lat, body.to_lng);

    if !from.is_valid() || !to.is_valid() {
        return Err(ApiError::InvalidRequest(
            "route endpoints must be valid coordinates".to_owned(),
        ));
    }

    Ok(Json(plan_route(from, to)))
}
