//! The shared in-memory state store.
//!
//! [`Store`] owns the three domain maps (users, reports, traffic samples)
//! behind a single [`RwLock`]. One lock guards all three collections
//! jointly, so a write to any map excludes concurrent reads of the others
//! and every operation observes a mutually consistent state. Nothing
//! outside this module touches the maps directly; callers get owned copies.
//!
//! Id counters are monotonic for the lifetime of the process and never
//! reused, even after a sweep removes the records they were assigned to.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rumbo_types::{Position, Report, ReportKind, Stats, TrafficSample, User};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::ValidationError;

/// Users idle longer than this are removed by the sweep.
const USER_IDLE_TTL: Duration = Duration::hours(1);

/// Reports older than this are removed by the sweep and excluded from
/// recent-report queries.
const REPORT_TTL: Duration = Duration::hours(24);

/// Traffic samples staler than this are removed by the sweep.
const TRAFFIC_TTL: Duration = Duration::hours(1);

/// Mutable state guarded by the store's lock.
#[derive(Debug)]
struct StoreInner {
    users: HashMap<u64, User>,
    reports: HashMap<u64, Report>,
    traffic: HashMap<String, TrafficSample>,
    next_user_id: u64,
    next_report_id: u64,
}

impl StoreInner {
    fn new() -> Self {
        Self {
            users: HashMap::new(),
            reports: HashMap::new(),
            traffic: HashMap::new(),
            next_user_id: 1,
            next_report_id: 1,
        }
    }
}

/// The exclusive owner of all mutable domain state.
///
/// Owned by the composition root and shared by reference with every
/// collaborator that needs it; never a process-wide singleton.
#[derive(Debug)]
pub struct Store {
    inner: RwLock<StoreInner>,
}

impl Store {
    /// Create an empty store with id counters starting at 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::new()),
        }
    }

    /// Register a user at a position, assigning the next id.
    ///
    /// Re-registering an existing name creates a new record with a new id;
    /// there is intentionally no update-in-place path.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyName`] if `username` is empty,
    /// [`ValidationError::CoordinatesOutOfRange`] if the position is
    /// invalid. The store is untouched on error.
    pub async fn create_user(
        &self,
        username: &str,
        lat: f64,
        lng: f64,
    ) -> Result<User, ValidationError> {
        if username.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        validate_position(lat, lng)?;

        let mut inner = self.inner.write().await;
        let user = User {
            id: inner.next_user_id,
            username: username.to_owned(),
            lat,
            lng,
            last_seen: Utc::now(),
        };
        inner.users.insert(user.id, user.clone());
        inner.next_user_id += 1;

        debug!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Create a report, assigning the next id and a vote count of 1.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownReportKind`] if `kind` is not one of
    /// `accident`, `police`, `traffic`, `hazard`;
    /// [`ValidationError::CoordinatesOutOfRange`] for an invalid position.
    /// The store is untouched on error.
    pub async fn create_report(
        &self,
        kind: &str,
        lat: f64,
        lng: f64,
        description: &str,
        user_id: u64,
    ) -> Result<Report, ValidationError> {
        let kind: ReportKind = kind.parse()?;
        validate_position(lat, lng)?;

        let mut inner = self.inner.write().await;
        let report = Report {
            id: inner.next_report_id,
            kind,
            lat,
            lng,
            description: description.to_owned(),
            user_id,
            created_at: Utc::now(),
            votes: 1,
        };
        inner.reports.insert(report.id, report.clone());
        inner.next_report_id += 1;

        debug!(report_id = report.id, kind = %report.kind, "report created");
        Ok(report)
    }

    /// All reports created within the last 24 hours, in no particular
    /// order.
    pub async fn recent_reports(&self) -> Vec<Report> {
        let now = Utc::now();
        let inner = self.inner.read().await;
        inner
            .reports
            .values()
            .filter(|r| now - r.created_at < REPORT_TTL)
            .cloned()
            .collect()
    }

    /// Point-in-time counters over the three collections, taken under a
    /// single shared-lock acquisition.
    pub async fn stats(&self) -> Stats {
        let inner = self.inner.read().await;
        Stats {
            users_online: inner.users.len(),
            total_reports: inner.reports.len(),
            traffic_points: inner.traffic.len(),
        }
    }

    /// Insert or overwrite the traffic sample for a quantized position key.
    pub async fn upsert_traffic_sample(&self, key: String, sample: TrafficSample) {
        let mut inner = self.inner.write().await;
        inner.traffic.insert(key, sample);
    }

    /// A defensive copy of all traffic samples keyed by quantized position.
    pub async fn all_traffic_samples(&self) -> HashMap<String, TrafficSample> {
        let inner = self.inner.read().await;
        inner.traffic.clone()
    }

    /// Remove expired records: users idle over an hour, reports older than
    /// 24 hours, traffic samples staler than an hour.
    ///
    /// Takes the exclusive lock like any other write, so it is safe to run
    /// concurrently with every other store operation. Idempotent: a second
    /// immediate call removes nothing more.
    pub async fn sweep(&self) {
        self.sweep_at(Utc::now()).await;
    }

    async fn sweep_at(&self, now: DateTime<Utc>) {
        let mut inner = self.inner.write().await;
        inner.users.retain(|_, user| now - user.last_seen <= USER_IDLE_TTL);
        inner.reports.retain(|_, report| now - report.created_at <= REPORT_TTL);
        inner.traffic.retain(|_, sample| now - sample.timestamp <= TRAFFIC_TTL);

        info!(
            users = inner.users.len(),
            reports = inner.reports.len(),
            traffic = inner.traffic.len(),
            "sweep completed"
        );
    }

    /// Seed a fixed set of demo reports with backdated timestamps.
    ///
    /// Intended for startup only, before the server accepts external
    /// requests. Overwrites report ids 1 through 3 and advances the report
    /// id counter to 4.
    pub async fn seed_sample_data(&self) {
        let now = Utc::now();
        let seeds = [
            (
                1,
                ReportKind::Traffic,
                Position::new(14.0818, -87.2068),
                "Heavy traffic downtown",
                Duration::minutes(10),
                5,
            ),
            (
                2,
                ReportKind::Police,
                Position::new(14.0900, -87.2100),
                "Police checkpoint on the north boulevard",
                Duration::minutes(5),
                3,
            ),
            (
                3,
                ReportKind::Accident,
                Position::new(14.0750, -87.2200),
                "Minor accident at the intersection",
                Duration::minutes(15),
                7,
            ),
        ];

        let mut inner = self.inner.write().await;
        for (id, kind, pos, description, age, votes) in seeds {
            inner.reports.insert(
                id,
                Report {
                    id,
                    kind,
                    lat: pos.lat,
                    lng: pos.lng,
                    description: description.to_owned(),
                    user_id: 1,
                    created_at: now - age,
                    votes,
                },
            );
        }
        inner.next_report_id = 4;

        info!("sample data seeded");
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_position(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if Position::new(lat, lng).is_valid() {
        Ok(())
    } else {
        Err(ValidationError::CoordinatesOutOfRange { lat, lng })
    }
}
