//! The fixed set of monitored city zones.

use rumbo_types::Position;

/// A named geographic zone the simulator samples every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    /// Human-readable zone name.
    pub name: &'static str,
    /// The zone's nominal position. Its quantized form is the sample key.
    pub position: Position,
}

/// The eight zones covered by the simulator, in stable index order.
///
/// The index of a zone in this array feeds the per-zone speed
/// perturbation, so the order is part of the model's determinism.
pub const ZONES: [Zone; 8] = [
    Zone {
        name: "Central Plaza",
        position: Position::new(14.0818, -87.2068),
    },
    Zone {
        name: "North Boulevard",
        position: Position::new(14.0900, -87.2100),
    },
    Zone {
        name: "South District",
        position: Position::new(14.0700, -87.2000),
    },
    Zone {
        name: "East District",
        position: Position::new(14.0800, -87.1900),
    },
    Zone {
        name: "West District",
        position: Position::new(14.0750, -87.2200),
    },
    Zone {
        name: "University",
        position: Position::new(14.0950, -87.2150),
    },
    Zone {
        name: "San Felipe Hospital",
        position: Position::new(14.0650, -87.2050),
    },
    Zone {
        name: "Multiplaza Mall",
        position: Position::new(14.0850, -87.1950),
    },
];
