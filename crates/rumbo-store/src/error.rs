//! Error types for the `rumbo-store` crate.

use rumbo_types::UnknownReportKind;

/// Rejected input to a store mutation.
///
/// Validation happens before any state is touched, so a failed mutation
/// never leaves a partial write behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The user's display name was empty.
    #[error("username must not be empty")]
    EmptyName,

    /// The report kind was not one of the recognized values.
    #[error(transparent)]
    UnknownReportKind(#[from] UnknownReportKind),

    /// A coordinate fell outside the valid latitude/longitude ranges.
    #[error("coordinates out of range: ({lat}, {lng})")]
    CoordinatesOutOfRange {
        /// The rejected latitude.
        lat: f64,
        /// The rejected longitude.
        lng: f64,
    },
}
