//! # Regressors
//! The `Regressor` seam the blending service works against, and the
//! gradient-boosting tree-ensemble implementation loaded from a JSON
//! artifact dump.
//!
//! Artifact layout:
//! ```json
//! {
//!   "name": "model_a",
//!   "feature_names": ["F1", "...", "F33"],
//!   "base_score": 48.0,
//!   "trees": [ { "nodes": [
//!       { "feature": 5, "threshold": 6.5, "left": 1, "right": 2 },
//!       { "leaf": -3.25 }
//!   ] } ]
//! }
//! ```
//! Splits compare `value < threshold` and descend left on true. A tree's
//! prediction is the leaf it lands in; the model output is the sum over
//! trees plus `base_score`.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{InferenceError, StartupError};
use crate::features::{FeatureRecord, FEATURE_COUNT, FEATURE_NAMES};

/// A trained regression model over the 33-field schema.
pub trait Regressor: Send + Sync {
    /// Unbounded raw prediction for one record.
    fn predict(&self, record: &FeatureRecord) -> Result<f64, InferenceError>;

    /// Stable identifier for logs and error reports.
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Walk from the root to a leaf. The node table is validated at load
    /// time, so the walk is bounded by the node count; exceeding it means
    /// the artifact changed under us and the request fails.
    fn evaluate(&self, record: &FeatureRecord, model: &str) -> Result<f64, InferenceError> {
        let mut idx = 0usize;
        for _ in 0..self.nodes.len() {
            match &self.nodes[idx] {
                Node::Leaf { leaf } => return Ok(*leaf),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if record.value(*feature) < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
        Err(InferenceError::CorruptTree {
            model: model.to_string(),
        })
    }
}

/// Additive tree ensemble deserialized from a JSON artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct GradientBoosting {
    name: String,
    feature_names: Vec<String>,
    base_score: f64,
    trees: Vec<Tree>,
}

impl GradientBoosting {
    /// Load and validate an artifact. Every failure names the path so the
    /// startup report can point at the offending file.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let raw = fs::read_to_string(path).map_err(|source| StartupError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model: GradientBoosting =
            serde_json::from_str(&raw).map_err(|source| StartupError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        model.validate_schema(path)?;
        info!(
            model = %model.name,
            trees = model.trees.len(),
            path = %path.display(),
            "loaded regressor artifact"
        );
        Ok(model)
    }

    /// Schema check: exact F1..F33 names in order, every split in bounds,
    /// no empty trees. Catching this here keeps `predict` panic-free.
    fn validate_schema(&self, path: &Path) -> Result<(), StartupError> {
        let mismatch = |detail: String| StartupError::SchemaMismatch {
            path: path.to_path_buf(),
            detail,
        };

        if self.feature_names.len() != FEATURE_COUNT {
            return Err(mismatch(format!(
                "expected {} feature names, found {}",
                FEATURE_COUNT,
                self.feature_names.len()
            )));
        }
        for (i, (found, expected)) in self
            .feature_names
            .iter()
            .zip(FEATURE_NAMES.iter())
            .enumerate()
        {
            if found != expected {
                return Err(mismatch(format!(
                    "expected {expected}, found {found} at position {i}"
                )));
            }
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(mismatch(format!("tree {t} has no nodes")));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if let Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= FEATURE_COUNT {
                        return Err(mismatch(format!(
                            "tree {t} node {n} splits on feature index {feature}"
                        )));
                    }
                    if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                        return Err(mismatch(format!(
                            "tree {t} node {n} references a child outside the node table"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Regressor for GradientBoosting {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, InferenceError> {
        let mut sum = self.base_score;
        for tree in &self.trees {
            sum += tree.evaluate(record, &self.name)?;
        }
        if !sum.is_finite() {
            return Err(InferenceError::NonFinite {
                model: self.name.clone(),
            });
        }
        Ok(sum)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
