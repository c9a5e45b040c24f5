//! Closed classification enums for reports and traffic samples.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a report kind string is not one of the recognized
/// values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report kind: {0}")]
pub struct UnknownReportKind(pub String);

/// The fixed set of report categories a user can submit.
///
/// Serialized in lowercase on the wire (`"accident"`, `"police"`,
/// `"traffic"`, `"hazard"`). Parsing any other string fails with
/// [`UnknownReportKind`]; there is deliberately no catch-all variant so a
/// stored report always carries a recognized kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// A traffic accident.
    Accident,
    /// A police checkpoint or patrol.
    Police,
    /// Heavy traffic or a jam.
    Traffic,
    /// A road hazard (debris, pothole, flooding).
    Hazard,
}

impl ReportKind {
    /// All recognized kinds, in a stable order.
    pub const ALL: [Self; 4] = [Self::Accident, Self::Police, Self::Traffic, Self::Hazard];

    /// The lowercase wire name of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accident => "accident",
            Self::Police => "police",
            Self::Traffic => "traffic",
            Self::Hazard => "hazard",
        }
    }
}

impl FromStr for ReportKind {
    type Err = UnknownReportKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accident" => Ok(Self::Accident),
            "police" => Ok(Self::Police),
            "traffic" => Ok(Self::Traffic),
            "hazard" => Ok(Self::Hazard),
            other => Err(UnknownReportKind(other.to_owned())),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-valued congestion classification derived from a sample's speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    /// Free-flowing traffic (speed above 40 km/h).
    Low,
    /// Slowed traffic (speed above 25 km/h, at most 40).
    Medium,
    /// Congested traffic (speed at or below 25 km/h).
    High,
}

impl CongestionLevel {
    /// Classify a speed in km/h.
    ///
    /// The thresholds are exclusive: exactly 40 km/h is `Medium`, exactly
    /// 25 km/h is `High`.
    pub fn for_speed(speed_kmh: f64) -> Self {
        if speed_kmh > 40.0 {
            Self::Low
        } else if speed_kmh > 25.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// The lowercase wire name of this level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn report_kind_round_trips_through_str() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.as_str().parse::<ReportKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unrecognized_kind_is_rejected() {
        let err = "earthquake".parse::<ReportKind>().unwrap_err();
        assert_eq!(err, UnknownReportKind("earthquake".to_owned()));
    }

    #[test]
    fn report_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ReportKind::Police).unwrap();
        assert_eq!(json, "\"police\"");
    }

    #[test]
    fn congestion_thresholds() {
        assert_eq!(CongestionLevel::for_speed(41.0), CongestionLevel::Low);
        assert_eq!(CongestionLevel::for_speed(40.0), CongestionLevel::Medium);
        assert_eq!(CongestionLevel::for_speed(26.0), CongestionLevel::Medium);
        assert_eq!(CongestionLevel::for_speed(25.0), CongestionLevel::High);
        assert_eq!(CongestionLevel::for_speed(5.0), CongestionLevel::High);
    }
}
