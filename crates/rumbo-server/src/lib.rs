//! HTTP + WebSocket server for the Rumbo live-traffic service.
//!
//! This crate provides:
//!
//! - **REST endpoints** for registering users, submitting reports,
//!   querying reports/stats/traffic, and straight-line route estimates
//! - **Push channel** (`GET /ws`) delivering stats and new-report events
//!   through the [`Hub`], whose single consumer task gives every
//!   subscriber the same event order
//! - **Process wiring**: configuration, router construction, and the
//!   server lifecycle used by the binary entry point
//!
//! The store, simulator, and sweep live in their own crates; this crate
//! owns only the delivery surface and the broadcast hub.
//!
//! [`Hub`]: hub::Hub

pub mod config;
pub mod error;
pub mod handlers;
pub mod hub;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

pub use config::AppConfig;
pub use hub::{Hub, HubEvent, run_hub};
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
