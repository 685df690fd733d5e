//! Gradient-boosted tree ensemble
//!
//! Multi-class boosting in the usual one-tree-per-class-per-round layout:
//! every tree belongs to one class, a class margin is `base_score` plus the
//! leaves reached in that class's trees, and probabilities are the softmax of
//! the margins.
//!
//! A split sends a sample left when `x < threshold`. Missing values (NaN)
//! follow `default_left`. Child indices must point forward in the node list,
//! which rules out cycles and guarantees every walk ends at a leaf.

use std::path::Path;

use serde::Deserialize;

use crate::artifacts::{read_artifact, ArtifactInfo, ArtifactRole};
use crate::error::{Error, Result};
use crate::models::FeatureVector;

use super::{softmax, Classifier};

/// A node in a decision tree
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        #[serde(default = "default_left")]
        default_left: bool,
    },
    Leaf {
        leaf: f64,
    },
}

fn default_left() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
struct Tree {
    class: usize,
    nodes: Vec<TreeNode>,
}

impl Tree {
    fn evaluate(&self, x: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf { leaf } => return leaf,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let value = x[feature];
                    let go_left = if value.is_nan() {
                        default_left
                    } else {
                        value < threshold
                    };
                    index = if go_left { left } else { right };
                }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawEnsemble {
    num_features: usize,
    num_classes: usize,
    #[serde(default = "default_base_score")]
    base_score: f64,
    trees: Vec<Tree>,
}

fn default_base_score() -> f64 {
    0.5
}

/// Gradient-boosted decision trees loaded from a JSON artifact
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    num_features: usize,
    num_classes: usize,
    base_score: f64,
    trees: Vec<Tree>,
}

impl TreeEnsemble {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawEnsemble = serde_json::from_str(json)
            .map_err(|e| Error::model_load("primary", format!("invalid JSON: {}", e)))?;

        let ensemble = Self {
            num_features: raw.num_features,
            num_classes: raw.num_classes,
            base_score: raw.base_score,
            trees: raw.trees,
        };
        ensemble.validate()?;
        Ok(ensemble)
    }

    /// Load from disk, returning the model and its fingerprint
    pub fn from_file(path: &Path) -> Result<(Self, ArtifactInfo)> {
        let (contents, info) = read_artifact(ArtifactRole::Primary, path)?;
        let model = Self::from_json(&contents).map_err(|e| match e {
            Error::ModelLoad { reason, .. } => Error::model_load(info.path.clone(), reason),
            other => other,
        })?;
        Ok((model, info))
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Raw per-class margins before softmax
    pub fn margins(&self, x: &[f64]) -> Result<Vec<f64>> {
        if x.len() != self.num_features {
            return Err(Error::Inference(format!(
                "tree ensemble expects {} features, got {}",
                self.num_features,
                x.len()
            )));
        }

        let mut margins = vec![self.base_score; self.num_classes];
        for tree in &self.trees {
            margins[tree.class] += tree.evaluate(x);
        }
        Ok(margins)
    }

    fn validate(&self) -> Result<()> {
        let fail = |reason: String| Err(Error::model_load("primary", reason));

        if self.num_features == 0 || self.num_classes == 0 {
            return fail("num_features and num_classes must be positive".to_string());
        }
        if self.trees.is_empty() {
            return fail("ensemble has no trees".to_string());
        }
        if !self.base_score.is_finite() {
            return fail("base_score must be finite".to_string());
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.class >= self.num_classes {
                return fail(format!(
                    "tree {} belongs to class {} but only {} classes exist",
                    t, tree.class, self.num_classes
                ));
            }
            if tree.nodes.is_empty() {
                return fail(format!("tree {} has no nodes", t));
            }

            for (i, node) in tree.nodes.iter().enumerate() {
                match *node {
                    TreeNode::Leaf { leaf } => {
                        if !leaf.is_finite() {
                            return fail(format!("tree {} node {} has a non-finite leaf", t, i));
                        }
                    }
                    TreeNode::Split {
                        feature,
                        threshold,
                        left,
                        right,
                        ..
                    } => {
                        if feature >= self.num_features {
                            return fail(format!(
                                "tree {} node {} splits on feature {} (only {} features)",
                                t, i, feature, self.num_features
                            ));
                        }
                        if threshold.is_nan() {
                            return fail(format!("tree {} node {} has a NaN threshold", t, i));
                        }
                        for child in [left, right] {
                            if child <= i || child >= tree.nodes.len() {
                                return fail(format!(
                                    "tree {} node {} points to invalid child {}",
                                    t, i, child
                                ));
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

impl Classifier for TreeEnsemble {
    fn kind(&self) -> &'static str {
        "tree_ensemble"
    }

    fn input_width(&self) -> usize {
        self.num_features
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn probabilities(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let margins = self.margins(features.as_slice())?;
        Ok(softmax(&margins))
    }
}
