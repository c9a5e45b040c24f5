//! Synthetic traffic sampling for the Rumbo live-traffic service.
//!
//! A deterministic speed model ([`simulated_speed`]) drives a periodic
//! background task ([`run_simulator`]) that writes one [`TrafficSample`]
//! per monitored zone into the store every tick. The model depends only on
//! the zone index and an injectable [`TimeSource`], so every sample is
//! reproducible in tests.
//!
//! [`TrafficSample`]: rumbo_types::TrafficSample

pub mod model;
pub mod simulator;
pub mod zones;

pub use model::{SystemTime, TimeSource, simulated_speed};
pub use simulator::{CongestionSummary, congestion_summary, run_simulator, simulate_once};
pub use zones::{ZONES, Zone};
