//! Trained risk-model backend.
//!
//! Loads a JSON artifact produced by the offline training job: a small
//! ensemble of axis-aligned decision trees over (latitude, longitude,
//! pressure), labeled with the same four-bucket rule table the fallback
//! classifier uses. Training itself is out of scope here — this module only
//! evaluates an existing artifact.
//!
//! The artifact is validated fully at load time so that prediction never
//! fails. A missing, unreadable, or malformed artifact surfaces as
//! `ModelError::Unavailable`, and the caller substitutes the rule backend.

use std::path::Path;

use serde::Deserialize;

use crate::model::{ModelError, Reading, RiskLevel};
use crate::risk::RiskBackend;

// ---------------------------------------------------------------------------
// Artifact format
// ---------------------------------------------------------------------------

/// Input feature referenced by a split node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Latitude,
    Longitude,
    Pressure,
}

/// One node of a decision tree. Nodes are stored flat; split children are
/// indices into the enclosing tree's node array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: Feature,
        threshold: f64,
        /// Taken when feature value < threshold.
        left: usize,
        /// Taken when feature value >= threshold.
        right: usize,
    },
    Leaf {
        risk: RiskLevel,
    },
}

/// One decision tree, rooted at node 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

/// The full trained artifact as serialized by the training job.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelArtifact {
    pub version: u32,
    pub trees: Vec<Tree>,
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Classifier backend evaluating a loaded `ModelArtifact`.
#[derive(Debug, Clone)]
pub struct ModelBackend {
    artifact: ModelArtifact,
}

impl ModelBackend {
    /// Loads and validates an artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ModelError::Unavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&raw).map_err(|e| {
            ModelError::Unavailable(format!("cannot parse {}: {}", path.display(), e))
        })?;
        Self::from_artifact(artifact)
    }

    /// Validates an already-deserialized artifact.
    ///
    /// Checks that every tree is non-empty and every split child index is in
    /// range, so `predict` can walk trees without bounds failures.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        if artifact.trees.is_empty() {
            return Err(ModelError::Unavailable("artifact has no trees".to_string()));
        }
        for (t, tree) in artifact.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::Unavailable(format!("tree {} has no nodes", t)));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if let Node::Split { left, right, .. } = node {
                    if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                        return Err(ModelError::Unavailable(format!(
                            "tree {} node {} references out-of-range child",
                            t, n
                        )));
                    }
                }
            }
        }
        Ok(ModelBackend { artifact })
    }

    /// Evaluates one tree against a reading.
    ///
    /// Walks at most `nodes.len()` steps; a split cycle (which validation
    /// does not rule out) terminates at the current best-effort answer
    /// rather than looping forever.
    fn eval_tree(tree: &Tree, reading: &Reading) -> RiskLevel {
        let mut idx = 0;
        for _ in 0..tree.nodes.len() {
            match &tree.nodes[idx] {
                Node::Leaf { risk } => return *risk,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = match feature {
                        Feature::Latitude => reading.latitude,
                        Feature::Longitude => reading.longitude,
                        Feature::Pressure => reading.pressure_hpa,
                    };
                    idx = if value < *threshold { *left } else { *right };
                }
            }
        }
        RiskLevel::Normal
    }

    /// Majority vote over the ensemble. Ties break toward the more severe
    /// level (fail-safe for an emergency system).
    pub fn predict(&self, reading: &Reading) -> RiskLevel {
        let mut votes = [0usize; 4];
        for tree in &self.artifact.trees {
            votes[Self::eval_tree(tree, reading).ordinal() as usize] += 1;
        }
        let mut best = RiskLevel::Normal;
        let mut best_votes = 0;
        for level in [
            RiskLevel::Normal,
            RiskLevel::Watch,
            RiskLevel::Warning,
            RiskLevel::Severe,
        ] {
            let v = votes[level.ordinal() as usize];
            if v >= best_votes && v > 0 {
                best = level;
                best_votes = v;
            }
        }
        best
    }
}

impl RiskBackend for ModelBackend {
    fn classify(&self, reading: &Reading) -> RiskLevel {
        self.predict(reading)
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

    /// A single tree that reproduces the rule table exactly:
    /// p < 920 → severe, < 980 → warning, < 1005 → watch, else normal.
    fn rule_equivalent_artifact() -> ModelArtifact {
        ModelArtifact {
            version: 1,
            trees: vec![Tree {
                nodes: vec![
                    Node::Split {
                        feature: Feature::Pressure,
                        threshold: 920.0,
                        left: 1,
                        right: 2,
                    },
                    Node::Leaf {
                        risk: RiskLevel::Severe,
                    },
                    Node::Split {
                        feature: Feature::Pressure,
                        threshold: 980.0,
                        left: 3,
                        right: 4,
                    },
                    Node::Leaf {
                        risk: RiskLevel::Warning,
                    },
                    Node::Split {
                        feature: Feature::Pressure,
                        threshold: 1005.0,
                        left: 5,
                        right: 6,
                    },
                    Node::Leaf {
                        risk: RiskLevel::Watch,
                    },
                    Node::Leaf {
                        risk: RiskLevel::Normal,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_rule_equivalent_tree_matches_rule_table() {
        let backend = ModelBackend::from_artifact(rule_equivalent_artifact())
            .expect("valid artifact should load");
        for p in [880.0, 919.999, 920.0, 955.0, 979.999, 980.0, 1004.999, 1005.0, 1020.0] {
            assert_eq!(
                backend.predict(&reading(p)),
                crate::risk::rules::classify_pressure(p),
                "model and rule table disagree at {} hPa",
                p
            );
        }
    }

    #[test]
    fn test_empty_artifact_is_unavailable() {
        let artifact = ModelArtifact {
            version: 1,
            trees: vec![],
        };
        assert!(ModelBackend::from_artifact(artifact).is_err());
    }

    #[test]
    fn test_out_of_range_child_is_unavailable() {
        let artifact = ModelArtifact {
            version: 1,
            trees: vec![Tree {
                nodes: vec![Node::Split {
                    feature: Feature::Pressure,
                    threshold: 1000.0,
                    left: 7, // no such node
                    right: 0,
                }],
            }],
        };
        assert!(ModelBackend::from_artifact(artifact).is_err());
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let result = ModelBackend::load(Path::new("/nonexistent/cyclone_model.json"));
        assert!(matches!(result, Err(ModelError::Unavailable(_))));
    }

    #[test]
    fn test_majority_vote_ties_break_severe() {
        // Two single-leaf trees voting Watch and Warning: tie, the more
        // severe level must win.
        let artifact = ModelArtifact {
            version: 1,
            trees: vec![
                Tree {
                    nodes: vec![Node::Leaf {
                        risk: RiskLevel::Watch,
                    }],
                },
                Tree {
                    nodes: vec![Node::Leaf {
                        risk: RiskLevel::Warning,
                    }],
                },
            ],
        };
        let backend = ModelBackend::from_artifact(artifact).unwrap();
        assert_eq!(backend.predict(&reading(990.0)), RiskLevel::Warning);
    }

    #[test]
    fn test_artifact_parses_from_json() {
        let json = r#"{
            "version": 1,
            "trees": [{
                "nodes": [
                    {"kind": "split", "feature": "pressure", "threshold": 1005.0, "left": 1, "right": 2},
                    {"kind": "leaf", "risk": "watch"},
                    {"kind": "leaf", "risk": "normal"}
                ]
            }]
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).expect("artifact JSON should parse");
        let backend = ModelBackend::from_artifact(artifact).unwrap();
        assert_eq!(backend.predict(&reading(1000.0)), RiskLevel::Watch);
        assert_eq!(backend.predict(&reading(1010.0)), RiskLevel::Normal);
    }
}
