//! Shared type definitions for the Rumbo live-traffic service.
//!
//! This crate holds the domain records (users, reports, traffic samples,
//! routes), the small closed enums that classify them, and the wire-level
//! message shapes exchanged over the push channel. Every other crate in the
//! workspace depends on these types; none of them carry behavior beyond
//! construction, classification, and (de)serialization.

pub mod domain;
pub mod enums;
pub mod wire;

pub use domain::{Position, Report, Route, Stats, TrafficSample, User};
pub use enums::{CongestionLevel, ReportKind, UnknownReportKind};
pub use wire::{ClientMessage, PushMessage};
