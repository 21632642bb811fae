//! Cyclone risk classification.
//!
//! One interface, two interchangeable backends: the authoritative
//! pressure-threshold rule table (`rules`) and a trained decision-tree
//! ensemble (`model`). The backend is chosen by configuration at startup —
//! if a model artifact path is configured and loads, the model is used;
//! otherwise the rule table is. Classification itself never fails.
//!
//! Submodules:
//! - `rules` — threshold table and `RuleBackend`.
//! - `model` — JSON artifact loading and `ModelBackend`.

pub mod model;
pub mod rules;

use std::path::Path;

use crate::logging::{self, DataSource};
use crate::model::{Reading, RiskLevel};

/// A risk-scoring backend. Implementations must be pure: no I/O, no shared
/// mutable state, safe to call from multiple threads.
pub trait RiskBackend: Send + Sync {
    fn classify(&self, reading: &Reading) -> RiskLevel;
}

/// Facade over the configured backend.
///
/// Constructed once at startup and shared read-only across callers.
pub struct RiskClassifier {
    backend: Box<dyn RiskBackend>,
}

impl RiskClassifier {
    /// Classifier using the rule table only.
    pub fn rule_based() -> Self {
        RiskClassifier {
            backend: Box::new(rules::RuleBackend),
        }
    }

    /// Classifier backed by a trained artifact, falling back to the rule
    /// table when the artifact is absent or cannot be loaded.
    ///
    /// The fallback substitution is required behavior, not best-effort: a
    /// broken artifact must degrade to rule classification, never to an
    /// error surfaced to the evaluation cycle.
    pub fn from_artifact_path(path: Option<&Path>) -> Self {
        match path {
            None => Self::rule_based(),
            Some(path) => match model::ModelBackend::load(path) {
                Ok(backend) => RiskClassifier {
                    backend: Box::new(backend),
                },
                Err(e) => {
                    logging::warn(
                        DataSource::System,
                        None,
                        &format!("{}; falling back to rule classifier", e),
                    );
                    Self::rule_based()
                }
            },
        }
    }

    /// Total classification: always returns a level, for any reading.
    pub fn classify(&self, reading: &Reading) -> RiskLevel {
        self.backend.classify(reading)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(pressure_hpa: f64) -> Reading {
        Reading {
            latitude: 17.6868,
            longitude: 83.2185,
            pressure_hpa,
        }
    }

    #[test]
    fn test_missing_artifact_falls_back_to_rule_backend() {
        // Fallback equivalence: a classifier pointed at a nonexistent
        // artifact must produce exactly the rule backend's answers.
        let broken = RiskClassifier::from_artifact_path(Some(Path::new(
            "/nonexistent/cyclone_model.json",
        )));
        let rules_only = RiskClassifier::rule_based();
        for p in [880.0, 920.0, 960.0, 980.0, 1000.0, 1005.0, 1020.0] {
            assert_eq!(
                broken.classify(&reading(p)),
                rules_only.classify(&reading(p)),
                "fallback classifier diverged from rule backend at {} hPa",
                p
            );
        }
    }

    #[test]
    fn test_no_path_configured_uses_rule_backend() {
        let classifier = RiskClassifier::from_artifact_path(None);
        assert_eq!(classifier.classify(&reading(900.0)), RiskLevel::Severe);
        assert_eq!(classifier.classify(&reading(1010.0)), RiskLevel::Normal);
    }

    #[test]
    fn test_classifier_is_shareable_across_threads() {
        let classifier = std::sync::Arc::new(RiskClassifier::rule_based());
        let mut handles = Vec::new();
        for i in 0..4 {
            let c = classifier.clone();
            handles.push(std::thread::spawn(move || {
                c.classify(&reading(900.0 + i as f64 * 40.0))
            }));
        }
        for handle in handles {
            handle.join().expect("classification thread should not panic");
        }
    }
}
