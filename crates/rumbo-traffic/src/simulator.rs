//! The background task that writes synthetic samples into the store.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use rumbo_store::Store;
use rumbo_types::{CongestionLevel, TrafficSample};
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::model::{TimeSource, simulated_speed};
use crate::zones::ZONES;

/// Recompute and upsert one sample per zone.
///
/// Samples for a zone overwrite the previous tick's entry because the
/// quantized position key is stable. This operation cannot fail; it only
/// writes.
pub async fn simulate_once(store: &Store, time: &dyn TimeSource) {
    let hour = time.local_hour();
    let unix = time.unix_seconds();
    let now = Utc::now();

    for (index, zone) in ZONES.iter().enumerate() {
        let speed = simulated_speed(index, hour, unix);
        let sample = TrafficSample {
            lat: zone.position.lat,
            lng: zone.position.lng,
            speed,
            congestion: CongestionLevel::for_speed(speed),
            timestamp: now,
        };
        store
            .upsert_traffic_sample(zone.position.traffic_key(), sample)
            .await;
    }

    debug!(zones = ZONES.len(), hour, "traffic samples refreshed");
}

/// Run the simulator on a fixed period until the shutdown signal flips.
///
/// The first batch of samples is written one full period after startup.
pub async fn run_simulator(
    store: Arc<Store>,
    time: Arc<dyn TimeSource>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                simulate_once(&store, time.as_ref()).await;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    debug!("traffic simulator shutting down");
                    return;
                }
            }
        }
    }
}

/// Count of live samples (under an hour old) per congestion level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CongestionSummary {
    /// Zones with free-flowing traffic.
    pub low: usize,
    /// Zones with slowed traffic.
    pub medium: usize,
    /// Zones with congested traffic.
    pub high: usize,
}

/// Summarize current congestion across all live traffic samples.
pub async fn congestion_summary(store: &Store) -> CongestionSummary {
    let now = Utc::now();
    let mut summary = CongestionSummary::default();

    for sample in store.all_traffic_samples().await.into_values() {
        if now - sample.timestamp >= ChronoDuration::hours(1) {
            continue;
        }
        match sample.congestion {
            CongestionLevel::Low => summary.low += 1,
            CongestionLevel::Medium => summary.medium += 1,
            CongestionLevel::High => summary.high += 1,
        }
    }

    summary
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// A frozen clock for reproducible samples.
    struct FixedTime {
        hour: u32,
        unix: i64,
    }

    impl TimeSource for FixedTime {
        fn local_hour(&self) -> u32 {
            self.hour
        }

        fn unix_seconds(&self) -> i64 {
            self.unix
        }
    }

    #[tokio::test]
    async fn simulate_once_writes_all_zones() {
        let store = Store::new();
        simulate_once(&store, &FixedTime { hour: 12, unix: 10 }).await;

        let samples = store.all_traffic_samples().await;
        assert_eq!(samples.len(), ZONES.len());
        for zone in &ZONES {
            assert!(samples.contains_key(&zone.position.traffic_key()));
        }
    }

    #[tokio::test]
    async fn resimulation_overwrites_rather_than_grows() {
        let store = Store::new();
        simulate_once(&store, &FixedTime { hour: 12, unix: 10 }).await;
        simulate_once(&store, &FixedTime { hour: 12, unix: 40 }).await;

        assert_eq!(store.stats().await.traffic_points, ZONES.len());
    }

    #[tokio::test]
    async fn samples_follow_the_deterministic_model() {
        let store = Store::new();
        let time = FixedTime { hour: 8, unix: 110 };
        simulate_once(&store, &time).await;

        let samples = store.all_traffic_samples().await;
        let central = &samples[&ZONES[0].position.traffic_key()];
        // Zone 0, rush hour, perturbation (0*7 + 110) % 20 - 10 == 0.
        assert!((central.speed - 25.0).abs() < f64::EPSILON);
        assert_eq!(central.congestion, CongestionLevel::Medium);
    }

    #[tokio::test]
    async fn summary_counts_levels() {
        let store = Store::new();
        // Rush hour: every zone lands at 25 +/- 10, i.e. medium or high.
        simulate_once(&store, &FixedTime { hour: 8, unix: 0 }).await;

        let summary = congestion_summary(&store).await;
        assert_eq!(summary.low, 0);
        assert_eq!(summary.medium + summary.high, ZONES.len());
    }

    #[tokio::test]
    async fn simulator_task_stops_on_shutdown() {
        let store = Arc::new(Store::new());
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(run_simulator(
            store,
            Arc::new(FixedTime { hour: 12, unix: 0 }),
            Duration::from_secs(3600),
            rx,
        ));

        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
