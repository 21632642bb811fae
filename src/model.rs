/// Core data types for the Vizag cyclone monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic, no I/O, and no external dependencies beyond serde —
/// only types.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Reading types
// ---------------------------------------------------------------------------

/// A single atmospheric observation for the monitored region.
///
/// Produced once per evaluation cycle, either from the live weather API
/// (`ingest::weather`) or from the configured default when the API is
/// unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    /// Sea-level atmospheric pressure in hectopascals.
    pub pressure_hpa: f64,
}

// ---------------------------------------------------------------------------
// Risk levels
// ---------------------------------------------------------------------------

/// Cyclone risk levels, in ascending order of severity.
///
/// Ordinal comparisons (`<`, `>`) follow severity. The authoritative
/// pressure-to-level mapping lives in `risk::rules`; any trained model
/// backend is calibrated against the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Normal = 0,
    Watch = 1,
    Warning = 2,
    Severe = 3,
}

impl RiskLevel {
    /// Ordinal encoding, matching the stored prediction history rows.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Three-band display string used by dashboards.
    ///
    /// Presentation only — the four-level ordinal is the single source of
    /// truth, and this mapping must never be inverted back into a level.
    pub fn display_band(self) -> &'static str {
        match self {
            RiskLevel::Normal => "Low",
            RiskLevel::Watch => "Medium",
            RiskLevel::Warning | RiskLevel::Severe => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Normal => write!(f, "NORMAL"),
            RiskLevel::Watch => write!(f, "WATCH"),
            RiskLevel::Warning => write!(f, "WARNING"),
            RiskLevel::Severe => write!(f, "SEVERE"),
        }
    }
}

// ---------------------------------------------------------------------------
// Forecast types
// ---------------------------------------------------------------------------

/// One simulated future (time-offset, risk) pair.
///
/// Produced by `forecast::simulate_with` from a bounded pressure walk.
/// Offsets are multiples of the simulation step (3 hours by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastPoint {
    pub offset_hours: u32,
    pub risk: RiskLevel,
}

// ---------------------------------------------------------------------------
// Alert types
// ---------------------------------------------------------------------------

/// Credentials for one messaging provider account.
///
/// The configured list order defines failover priority — the first entry
/// is attempted first. `account_sid` and `auth_token` are secrets and must
/// not appear in logs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderCredential {
    /// Human-readable account label, e.g. "primary". Used in outcome
    /// reporting and failure summaries.
    pub label: String,
    pub account_sid: String,
    pub auth_token: String,
    /// E.164 sender number the provider dispatches from.
    pub sender_number: String,
}

/// One emergency notification to a single contact.
///
/// Constructed fresh per dispatch and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRequest {
    /// E.164 destination phone number.
    pub destination: String,
    /// Human-readable location embedded in the message body.
    pub location_label: String,
    pub risk: RiskLevel,
}

/// A failed provider attempt, recorded during failover.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderFailure {
    pub provider_label: String,
    pub message: String,
}

/// Result of a full failover dispatch.
///
/// Invariant: `succeeded == provider_label.is_some()`. `failures` holds one
/// entry per provider that was attempted and failed, in attempt order,
/// whether or not a later provider eventually succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertOutcome {
    pub succeeded: bool,
    pub provider_label: Option<String>,
    pub failures: Vec<ProviderFailure>,
}

/// A citizen-submitted incident report.
///
/// Owned by the surrounding application (it decides where the list lives);
/// the core only defines the shape.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentReport {
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors from a trained risk-model backend.
#[derive(Debug, PartialEq)]
pub enum ModelError {
    /// The model artifact could not be loaded or parsed. Callers must
    /// substitute the rule backend.
    Unavailable(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::Unavailable(reason) => {
                write!(f, "risk model unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// Errors from a single provider attempt (send-text or place-call).
///
/// These are non-fatal at the dispatch level: they are absorbed into
/// `AlertOutcome.failures` and drive failover to the next provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Non-2xx HTTP response from the provider API (includes auth
    /// rejections, which arrive as 401/403).
    HttpStatus(u16),
    /// Request never completed: connection failure, DNS, or timeout.
    Transport(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::HttpStatus(code) => write!(f, "HTTP {} from provider", code),
            ProviderError::Transport(msg) => write!(f, "transport error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Fatal dispatch errors. Unlike `ProviderError`, these are surfaced to the
/// caller and must not be retried.
#[derive(Debug, PartialEq)]
pub enum DispatchError {
    /// The provider list was empty. Dispatch over zero providers is a
    /// configuration error, not a silent no-op.
    NoProvidersConfigured,
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::NoProvidersConfigured => {
                write!(f, "no messaging providers configured")
            }
        }
    }
}

impl std::error::Error for DispatchError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_levels_are_ordered_by_severity() {
        assert!(RiskLevel::Normal < RiskLevel::Watch);
        assert!(RiskLevel::Watch < RiskLevel::Warning);
        assert!(RiskLevel::Warning < RiskLevel::Severe);
    }

    #[test]
    fn test_risk_level_ordinals_match_stored_encoding() {
        // Prediction history rows store the ordinal; changing it would
        // silently corrupt historical comparisons.
        assert_eq!(RiskLevel::Normal.ordinal(), 0);
        assert_eq!(RiskLevel::Watch.ordinal(), 1);
        assert_eq!(RiskLevel::Warning.ordinal(), 2);
        assert_eq!(RiskLevel::Severe.ordinal(), 3);
    }

    #[test]
    fn test_display_band_collapses_top_two_levels() {
        assert_eq!(RiskLevel::Normal.display_band(), "Low");
        assert_eq!(RiskLevel::Watch.display_band(), "Medium");
        assert_eq!(RiskLevel::Warning.display_band(), "High");
        assert_eq!(RiskLevel::Severe.display_band(), "High");
    }

    #[test]
    fn test_risk_level_serde_round_trip() {
        // The model artifact stores leaf labels as lowercase strings.
        let json = serde_json::to_string(&RiskLevel::Severe).unwrap();
        assert_eq!(json, "\"severe\"");
        let back: RiskLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RiskLevel::Severe);
    }

    #[test]
    fn test_error_display_messages() {
        let err = DispatchError::NoProvidersConfigured;
        assert_eq!(err.to_string(), "no messaging providers configured");

        let err = ProviderError::HttpStatus(401);
        assert_eq!(err.to_string(), "HTTP 401 from provider");

        let err = ModelError::Unavailable("file not found".to_string());
        assert!(err.to_string().contains("file not found"));
    }
}
