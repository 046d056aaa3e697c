//! Memory pressure bands

use serde::{Deserialize, Serialize};

use crate::meminfo::MemorySnapshot;

/// Coarse health band derived from the share of memory in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureLevel {
    Normal,
    Moderate,
    High,
    Critical,
}

impl PressureLevel {
    /// Classify a usage percentage. Each threshold must be exceeded, so
    /// exactly 50, 75 and 90 stay in the lower band.
    pub fn from_percent(pressure: f64) -> Self {
        if pressure > 90.0 {
            PressureLevel::Critical
        } else if pressure > 75.0 {
            PressureLevel::High
        } else if pressure > 50.0 {
            PressureLevel::Moderate
        } else {
            PressureLevel::Normal
        }
    }

    pub fn of(snapshot: &MemorySnapshot) -> Self {
        Self::from_percent(snapshot.pressure())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PressureLevel::Normal => "NORMAL",
            PressureLevel::Moderate => "MODERATE",
            PressureLevel::High => "HIGH",
            PressureLevel::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for PressureLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
