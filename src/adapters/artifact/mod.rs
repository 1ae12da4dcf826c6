//! JSON model artifact adapter.
//!
//! Loads a regression model exported by the training pipeline and evaluates
//! it in-process. Two model kinds are supported:
//! - `linear`: intercept plus one coefficient per feature
//! - `tree_ensemble`: gradient-boosted regression trees (XGBoost layout),
//!   summed on top of a base score
//!
//! The artifact is loaded once and never mutated.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{EncodedProfile, FEATURE_NAMES};
use crate::ports::{PredictError, Predictor};

/// File name looked up when the configured model path is a directory.
pub const DEFAULT_MODEL_FILE: &str = "insurance_model.json";

/// Artifact format understood by this adapter.
const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// Upper bound on nodes per tree, rejects absurd exports early.
const MAX_TREE_NODES: usize = 1 << 16;

/// Errors raised while loading an artifact.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArtifactError {
    #[error("Model artifact not found at {0:?}")]
    Unavailable(PathBuf),

    #[error("Model artifact is corrupt: {0}")]
    Corrupt(String),
}

/// Serialized model as exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub model: ModelKind,
    #[serde(default)]
    pub info: Option<ModelInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    TreeEnsemble {
        base_score: f64,
        trees: Vec<Tree>,
    },
}

/// One regression tree stored as a flat node array, root at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

/// A tree node. Samples with `x[feature] < threshold` go left.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Descriptive metadata shown in the "About the model" panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub algorithm: String,
    #[serde(default)]
    pub r_squared: Option<f64>,
    #[serde(default)]
    pub tuning: Option<String>,
    #[serde(default)]
    pub dataset: Option<DatasetSummary>,
}

/// Summary of the training data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub samples: u32,
    pub mean_cost: f64,
    pub mean_age: f64,
    pub mean_bmi: f64,
}

impl Tree {
    fn evaluate(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    // Missing values follow the right branch, like XGBoost's default.
                    idx = if row[*feature] < *threshold { *left } else { *right };
                }
            }
        }
    }

    fn validate(&self, tree_idx: usize, n_features: usize) -> Result<(), ArtifactError> {
        if self.nodes.is_empty() {
            return Err(ArtifactError::Corrupt(format!("tree {tree_idx} has no nodes")));
        }
        if self.nodes.len() > MAX_TREE_NODES {
            return Err(ArtifactError::Corrupt(format!(
                "tree {tree_idx} has {} nodes, max {MAX_TREE_NODES}",
                self.nodes.len()
            )));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(ArtifactError::Corrupt(format!(
                            "tree {tree_idx} node {i}: non-finite leaf value"
                        )));
                    }
                }
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(ArtifactError::Corrupt(format!(
                            "tree {tree_idx} node {i}: feature index {feature} out of range"
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ArtifactError::Corrupt(format!(
                            "tree {tree_idx} node {i}: NaN threshold"
                        )));
                    }
                    // Children must point forward; this rules out cycles.
                    for child in [left, right] {
                        if *child <= i || *child >= self.nodes.len() {
                            return Err(ArtifactError::Corrupt(format!(
                                "tree {tree_idx} node {i}: invalid child index {child}"
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl ModelArtifact {
    /// Structural checks run once at load time.
    ///
    /// # Errors
    /// Returns `ArtifactError::Corrupt` describing the first problem found.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(ArtifactError::Corrupt(format!(
                "unsupported format_version {} (expected {SUPPORTED_FORMAT_VERSION})",
                self.format_version
            )));
        }

        let n = self.feature_names.len();
        if n == 0 {
            return Err(ArtifactError::Corrupt("feature_names is empty".into()));
        }

        match &self.model {
            ModelKind::Linear {
                intercept,
                coefficients,
            } => {
                if coefficients.len() != n {
                    return Err(ArtifactError::Corrupt(format!(
                        "linear model has {} coefficients for {n} features",
                        coefficients.len()
                    )));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(ArtifactError::Corrupt(
                        "linear model parameters must be finite".into(),
                    ));
                }
            }
            ModelKind::TreeEnsemble { base_score, trees } => {
                if !base_score.is_finite() {
                    return Err(ArtifactError::Corrupt("base_score must be finite".into()));
                }
                if trees.is_empty() {
                    return Err(ArtifactError::Corrupt("tree ensemble has no trees".into()));
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(i, n)?;
                }
            }
        }
        Ok(())
    }

    /// Short model kind label for logs.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.model {
            ModelKind::Linear { .. } => "linear",
            ModelKind::TreeEnsemble { .. } => "tree_ensemble",
        }
    }
}

/// Predictor backed by a JSON model artifact.
#[derive(Debug, Clone)]
pub struct ArtifactPredictor {
    artifact: ModelArtifact,
    source: Option<PathBuf>,
}

impl ArtifactPredictor {
    /// Load and validate an artifact from a file, or from
    /// [`DEFAULT_MODEL_FILE`] inside a directory.
    ///
    /// # Errors
    /// Returns `ArtifactError::Unavailable` if the file does not exist and
    /// `ArtifactError::Corrupt` if it cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let model_path = if path.is_dir() {
            path.join(DEFAULT_MODEL_FILE)
        } else {
            path.to_path_buf()
        };

        let content = std::fs::read_to_string(&model_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ArtifactError::Unavailable(model_path.clone())
            } else {
                ArtifactError::Corrupt(format!("failed to read {model_path:?}: {e}"))
            }
        })?;

        let mut predictor = Self::from_json(&content)?;
        predictor.source = Some(model_path);

        tracing::info!(
            "Loaded model artifact from {:?} (kind={}, n_features={})",
            predictor.source,
            predictor.artifact.kind_name(),
            predictor.artifact.feature_names.len()
        );
        Ok(predictor)
    }

    /// Parse and validate an artifact from a JSON string.
    ///
    /// # Errors
    /// Returns `ArtifactError::Corrupt` on malformed JSON or invalid structure.
    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let artifact: ModelArtifact =
            serde_json::from_str(json).map_err(|e| ArtifactError::Corrupt(e.to_string()))?;
        Self::from_artifact(artifact)
    }

    /// Wrap an already-deserialized artifact.
    ///
    /// # Errors
    /// Returns `ArtifactError::Corrupt` if validation fails.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        artifact.validate()?;

        if !schema_matches(&artifact.feature_names) {
            tracing::warn!(
                "Model feature names {:?} differ from the input schema {:?}; predictions will be refused",
                artifact.feature_names,
                FEATURE_NAMES
            );
        }

        Ok(Self {
            artifact,
            source: None,
        })
    }

    #[must_use]
    pub fn info(&self) -> Option<&ModelInfo> {
        self.artifact.info.as_ref()
    }

    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }
}

fn schema_matches(names: &[String]) -> bool {
    names.len() == FEATURE_NAMES.len() && names.iter().zip(FEATURE_NAMES).all(|(a, b)| a == b)
}

impl Predictor for ArtifactPredictor {
    fn feature_names(&self) -> &[String] {
        &self.artifact.feature_names
    }

    fn predict(&self, row: &EncodedProfile) -> Result<f64, PredictError> {
        if !schema_matches(&self.artifact.feature_names) {
            return Err(PredictError::SchemaMismatch {
                expected: self.artifact.feature_names.clone(),
                actual: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
            });
        }

        let x = row.to_row();
        let value = match &self.artifact.model {
            ModelKind::Linear {
                intercept,
                coefficients,
            } => intercept + coefficients.iter().zip(x.iter()).map(|(c, v)| c * v).sum::<f64>(),
            ModelKind::TreeEnsemble { base_score, trees } => {
                base_score + trees.iter().map(|t| t.evaluate(&x)).sum::<f64>()
            }
        };

        if !value.is_finite() {
            return Err(PredictError::NonFinite(value));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientProfile, Region, Sex, SmokerStatus};
    use tempfile::tempdir;

    fn names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect()
    }

    fn linear_artifact() -> ModelArtifact {
        ModelArtifact {
            format_version: 1,
            feature_names: names(),
            model: ModelKind::Linear {
                intercept: 1_000.0,
                coefficients: vec![100.0, 10.0, 50.0, 0.0, 20_000.0, -100.0],
            },
            info: None,
        }
    }

    fn smoker_tree_artifact() -> ModelArtifact {
        // Root splits on smoker_encoded, right child splits on bmi.
        ModelArtifact {
            format_version: 1,
            feature_names: names(),
            model: ModelKind::TreeEnsemble {
                base_score: 500.0,
                trees: vec![
                    Tree {
                        nodes: vec![
                            TreeNode::Split {
                                feature: 4,
                                threshold: 0.5,
                                left: 1,
                                right: 2,
                            },
                            TreeNode::Leaf { value: 5_000.0 },
                            TreeNode::Split {
                                feature: 1,
                                threshold: 30.0,
                                left: 3,
                                right: 4,
                            },
                            TreeNode::Leaf { value: 20_000.0 },
                            TreeNode::Leaf { value: 40_000.0 },
                        ],
                    },
                    Tree {
                        nodes: vec![TreeNode::Leaf { value: 250.0 }],
                    },
                ],
            },
            info: None,
        }
    }

    #[test]
    fn test_linear_prediction() {
        let predictor = ArtifactPredictor::from_artifact(linear_artifact()).expect("valid");
        let profile = PatientProfile::new(
            40,
            30.0,
            2,
            Sex::Male,
            SmokerStatus::Smoker,
            Region::Southeast,
        )
        .unwrap();

        let cost = predictor.predict(&profile.encode()).expect("predict");
        let expected = 1_000.0 + 4_000.0 + 300.0 + 100.0 + 0.0 + 20_000.0 - 200.0;
        assert!((cost - expected).abs() < 1e-9);
    }

    #[test]
    fn test_tree_ensemble_prediction() {
        let predictor = ArtifactPredictor::from_artifact(smoker_tree_artifact()).expect("valid");

        let base = PatientProfile::default();
        let non_smoker = predictor.predict(&base.encode()).unwrap();
        assert!((non_smoker - 5_750.0).abs() < 1e-9);

        let smoker = PatientProfile {
            smoker: SmokerStatus::Smoker,
            bmi: 29.9,
            ..base
        };
        assert!((predictor.predict(&smoker.encode()).unwrap() - 20_750.0).abs() < 1e-9);

        // Threshold equality goes right.
        let obese_smoker = PatientProfile { bmi: 30.0, ..smoker };
        assert!((predictor.predict(&obese_smoker.encode()).unwrap() - 40_750.0).abs() < 1e-9);
    }

    #[test]
    fn test_schema_mismatch_refuses_prediction() {
        let mut artifact = linear_artifact();
        artifact.feature_names.swap(3, 4);
        let predictor = ArtifactPredictor::from_artifact(artifact).expect("structurally valid");

        let err = predictor.predict(&PatientProfile::default().encode()).unwrap_err();
        assert!(matches!(err, PredictError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let mut artifact = linear_artifact();
        if let ModelKind::Linear { coefficients, .. } = &mut artifact.model {
            coefficients.pop();
        }
        assert!(matches!(
            ArtifactPredictor::from_artifact(artifact),
            Err(ArtifactError::Corrupt(_))
        ));
    }

    #[test]
    fn test_rejects_backward_child_pointer() {
        let mut artifact = smoker_tree_artifact();
        if let ModelKind::TreeEnsemble { trees, .. } = &mut artifact.model {
            trees[0].nodes[2] = TreeNode::Split {
                feature: 1,
                threshold: 30.0,
                left: 0,
                right: 4,
            };
        }
        let err = ArtifactPredictor::from_artifact(artifact).unwrap_err();
        assert!(err.to_string().contains("invalid child index 0"));
    }

    #[test]
    fn test_rejects_unknown_version_and_feature_index() {
        let mut artifact = linear_artifact();
        artifact.format_version = 7;
        assert!(ArtifactPredictor::from_artifact(artifact).is_err());

        let mut artifact = smoker_tree_artifact();
        if let ModelKind::TreeEnsemble { trees, .. } = &mut artifact.model {
            trees[0].nodes[0] = TreeNode::Split {
                feature: 6,
                threshold: 0.5,
                left: 1,
                right: 2,
            };
        }
        assert!(ArtifactPredictor::from_artifact(artifact).is_err());
    }

    #[test]
    fn test_load_missing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert_eq!(
            ArtifactPredictor::load(&path).unwrap_err(),
            ArtifactError::Unavailable(path)
        );
    }

    #[test]
    fn test_load_garbage_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"\x80not json at all").unwrap();
        assert!(matches!(
            ArtifactPredictor::load(&path),
            Err(ArtifactError::Corrupt(_))
        ));

        std::fs::write(&path, r#"{"format_version": 1, "feature_names": [], "model": {"kind": "svm"}}"#)
            .unwrap();
        assert!(matches!(
            ArtifactPredictor::load(&path),
            Err(ArtifactError::Corrupt(_))
        ));
    }

    #[test]
    fn test_load_from_directory_uses_default_file() {
        let dir = tempdir().unwrap();
        let json = serde_json::to_string(&smoker_tree_artifact()).unwrap();
        std::fs::write(dir.path().join(DEFAULT_MODEL_FILE), json).unwrap();

        let predictor = ArtifactPredictor::load(dir.path()).expect("loads");
        assert_eq!(
            predictor.source(),
            Some(dir.path().join(DEFAULT_MODEL_FILE).as_path())
        );
        assert_eq!(predictor.artifact().kind_name(), "tree_ensemble");
    }

    #[test]
    fn test_bundled_model_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models");
        let predictor = ArtifactPredictor::load(&path).expect("bundled model");
        assert!(predictor.info().is_some());

        let cost = predictor.predict(&PatientProfile::default().encode()).unwrap();
        assert!(cost.is_finite() && cost > 0.0);

        let smoker = PatientProfile {
            smoker: SmokerStatus::Smoker,
            ..PatientProfile::default()
        };
        assert!(predictor.predict(&smoker.encode()).unwrap() > cost);
    }
}
