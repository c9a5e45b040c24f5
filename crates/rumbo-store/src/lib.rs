//! Concurrent in-memory state store for the Rumbo live-traffic service.
//!
//! The [`Store`] owns all mutable domain state (users, reports, traffic
//! samples) behind a single reader/writer lock, and [`run_sweeper`] is the
//! background task that periodically expires stale records. There is no
//! persistence; a restart loses everything by design.

pub mod error;
pub mod store;
pub mod sweep;

pub use error::ValidationError;
pub use store::Store;
pub use sweep::run_sweeper;
