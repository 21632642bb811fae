//! Authoritative pressure-threshold rule table.
//!
//! This is the fallback classifier (always available, zero dependencies)
//! and the ground truth any trained backend is calibrated against. The
//! forecast simulator also classifies through this table directly, since
//! the synthetic walk models pressure only.

use crate::model::{Reading, RiskLevel};
use crate::risk::RiskBackend;

// ---------------------------------------------------------------------------
// Threshold boundaries (hPa)
// ---------------------------------------------------------------------------

/// Below this pressure the risk is SEVERE.
pub const SEVERE_BELOW_HPA: f64 = 920.0;

/// Below this pressure (and at or above `SEVERE_BELOW_HPA`) the risk is WARNING.
pub const WARNING_BELOW_HPA: f64 = 980.0;

/// Below this pressure (and at or above `WARNING_BELOW_HPA`) the risk is WATCH.
/// At or above it the risk is NORMAL.
pub const WATCH_BELOW_HPA: f64 = 1005.0;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Maps a pressure to a risk level using half-open buckets:
///
///   p < 920          → Severe
///   920 ≤ p < 980    → Warning
///   980 ≤ p < 1005   → Watch
///   p ≥ 1005         → Normal
///
/// Total over all finite pressures; extreme values saturate at the ends.
pub fn classify_pressure(pressure_hpa: f64) -> RiskLevel {
    if pressure_hpa < SEVERE_BELOW_HPA {
        RiskLevel::Severe
    } else if pressure_hpa < WARNING_BELOW_HPA {
        RiskLevel::Warning
    } else if pressure_hpa < WATCH_BELOW_HPA {
        RiskLevel::Watch
    } else {
        RiskLevel::Normal
    }
}

/// Rule-based classifier backend. Ignores latitude/longitude — the rule
/// table is pressure-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBackend;

impl RiskBackend for RuleBackend {
    fn classify(&self, reading: &Reading) -> RiskLevel {
        classify_pressure(reading.pressure_hpa)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
