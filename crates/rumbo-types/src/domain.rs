//! Domain records held by the state store and served over the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{CongestionLevel, ReportKind};

/// A geographic coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in decimal degrees, valid range [-90, 90].
    pub lat: f64,
    /// Longitude in decimal degrees, valid range [-180, 180].
    pub lng: f64,
}

impl Position {
    /// Build a position from a latitude/longitude pair.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are inside their valid ranges.
    pub fn is_valid(self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// The quantized string key used for traffic samples, rounded to four
    /// decimal places, e.g. `"14.0818,-87.2068"`.
    ///
    /// Rounding is part of the keying contract: nearby re-simulated points
    /// at the same nominal location must collide on the same key.
    pub fn traffic_key(self) -> String {
        format!("{:.4},{:.4}", self.lat, self.lng)
    }
}

/// A registered user with a last-known position.
///
/// Re-registering the same display name creates a new record with a new id;
/// there is no in-place update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Monotonically assigned identifier, starting at 1.
    pub id: u64,
    /// Display name; never empty.
    pub username: String,
    /// Latitude of the last reported position.
    pub lat: f64,
    /// Longitude of the last reported position.
    pub lng: f64,
    /// When the user last checked in. Users idle for more than an hour are
    /// swept.
    pub last_seen: DateTime<Utc>,
}

/// A user-submitted road report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Monotonically assigned identifier, starting at 1.
    pub id: u64,
    /// Report category.
    #[serde(rename = "type")]
    pub kind: ReportKind,
    /// Latitude of the reported incident.
    pub lat: f64,
    /// Longitude of the reported incident.
    pub lng: f64,
    /// Free-text description.
    pub description: String,
    /// Id of the submitting user. May dangle after the user is swept;
    /// no cross-map integrity is enforced.
    pub user_id: u64,
    /// Submission time. Reports older than 24 hours are swept.
    pub created_at: DateTime<Utc>,
    /// Vote count, starts at 1.
    pub votes: u32,
}

/// A synthesized traffic measurement for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSample {
    /// Latitude of the sampled zone.
    pub lat: f64,
    /// Longitude of the sampled zone.
    pub lng: f64,
    /// Speed in km/h, clamped to [5, 70].
    pub speed: f64,
    /// Congestion level derived from the speed.
    pub congestion: CongestionLevel,
    /// Sample time. Samples older than an hour are swept.
    pub timestamp: DateTime<Utc>,
}

/// A straight-line route estimate between two positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Origin.
    pub from: Position,
    /// Destination.
    pub to: Position,
    /// Linearly interpolated waypoints, origin and destination included.
    pub points: Vec<Position>,
    /// Great-circle distance in kilometres.
    pub distance: f64,
    /// Estimated travel time in minutes.
    pub duration: u64,
}

/// Point-in-time counters over the store's three collections.
///
/// Taken under a single shared-lock acquisition so the three counts are
/// mutually consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of live users.
    pub users_online: usize,
    /// Number of stored reports.
    pub total_reports: usize,
    /// Number of stored traffic samples.
    pub traffic_points: usize,
}
