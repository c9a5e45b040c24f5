//! The deterministic speed model behind the simulator.
//!
//! Speed is a pure function of the zone index, the local wall-clock hour,
//! and the current unix time, so tests can reproduce any sample exactly by
//! fixing the [`TimeSource`].

use chrono::{Local, Timelike, Utc};

/// Free-flow base speed in km/h.
const BASE_SPEED_KMH: f64 = 45.0;

/// Base speed during the two rush-hour windows.
const RUSH_HOUR_SPEED_KMH: f64 = 25.0;

/// Base speed during the night window.
const NIGHT_SPEED_KMH: f64 = 55.0;

/// Lower clamp on the final speed.
const MIN_SPEED_KMH: f64 = 5.0;

/// Upper clamp on the final speed (urban limit).
const MAX_SPEED_KMH: f64 = 70.0;

/// Source of wall-clock time for the speed model.
///
/// Production uses [`SystemTime`]; tests inject a fixed implementation to
/// make samples reproducible.
pub trait TimeSource: Send + Sync {
    /// Local wall-clock hour, 0 through 23.
    fn local_hour(&self) -> u32;

    /// Current unix time in whole seconds.
    fn unix_seconds(&self) -> i64;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn local_hour(&self) -> u32 {
        Local::now().hour()
    }

    fn unix_seconds(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Compute the simulated speed for a zone at a moment in time.
///
/// Base speed is 45 km/h, dropped to 25 during the rush-hour windows
/// (07:00-09:00 and 17:00-19:00, both ends inclusive) and raised to 55
/// during the night window (hour >= 22 or <= 5; the night window wins
/// where the checks could overlap). A per-zone perturbation of
/// `(zone_index * 7 + unix_seconds) mod 20 - 10` km/h is added, and the
/// result is clamped to [5, 70].
pub fn simulated_speed(zone_index: usize, hour: u32, unix_seconds: i64) -> f64 {
    let mut base = BASE_SPEED_KMH;
    if (7..=9).contains(&hour) || (17..=19).contains(&hour) {
        base = RUSH_HOUR_SPEED_KMH;
    }
    if hour >= 22 || hour <= 5 {
        base = NIGHT_SPEED_KMH;
    }

    let perturbation = ((zone_index as i64 * 7 + unix_seconds) % 20 - 10) as f64;

    (base + perturbation).clamp(MIN_SPEED_KMH, MAX_SPEED_KMH)
}
