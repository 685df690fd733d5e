//! Pre-trained spending-behavior classifiers
//!
//! This module provides a model-agnostic interface over the two classifiers
//! the recommender runs on every submission.
//!
//! # Architecture
//!
//! - `Classifier` trait: the interface every model implements
//! - `TreeEnsemble`: gradient-boosted decision trees (primary model)
//! - `DenseNetwork`: fully connected neural network (secondary model)
//! - `StubClassifier`: fixed answers for tests and demos
//!
//! Models are loaded once from JSON artifacts and never retrained. Each
//! produces one score per [`Category`]; the prediction is the arg-max.

mod network;
mod stub;
mod tree;

pub use network::{Activation, DenseLayer, DenseNetwork};
pub use stub::StubClassifier;
pub use tree::{TreeEnsemble, TreeNode};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Category, FeatureVector};

/// Trait defining the interface for all classifiers
///
/// Implementations must be deterministic and stateless per call so a single
/// loaded instance can be shared by every request.
pub trait Classifier: Send + Sync {
    /// Short model family name (for logs and health output)
    fn kind(&self) -> &'static str;

    /// Length of the feature vectors the model accepts
    fn input_width(&self) -> usize;

    /// Number of classes the model scores
    fn num_classes(&self) -> usize;

    /// Class probabilities, one per class, summing to 1
    fn probabilities(&self, features: &FeatureVector) -> Result<Vec<f64>>;

    /// Predict the most likely category
    fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        if features.len() != self.input_width() {
            return Err(Error::Inference(format!(
                "{} model expects {} features, got {}",
                self.kind(),
                self.input_width(),
                features.len()
            )));
        }

        let probabilities = self.probabilities(features)?;
        let index = argmax(&probabilities).ok_or_else(|| {
            Error::Inference(format!("{} model produced no usable scores", self.kind()))
        })?;
        let category = Category::from_index(index).ok_or_else(|| {
            Error::Inference(format!(
                "{} model predicted unknown class {}",
                self.kind(),
                index
            ))
        })?;

        Ok(Prediction {
            category,
            probabilities,
        })
    }
}

/// Output of one classifier for one household
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub category: Category,
    /// Probability per class index
    pub probabilities: Vec<f64>,
}

impl Prediction {
    /// Probability assigned to the predicted category
    pub fn confidence(&self) -> f64 {
        self.probabilities
            .get(self.category.index())
            .copied()
            .unwrap_or(0.0)
    }
}

/// Index of the largest finite score; ties go to the lowest index
pub fn argmax(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

/// Numerically stable softmax
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Check that a loaded model fits the pipeline (class count, input width)
pub(crate) fn check_shape(model: &dyn Classifier, role: &str, expected_width: usize) -> Result<()> {
    if model.num_classes() != Category::COUNT {
        return Err(Error::model_load(
            role,
            format!(
                "{} model scores {} classes, expected {}",
                model.kind(),
                model.num_classes(),
                Category::COUNT
            ),
        ));
    }
    if model.input_width() != expected_width {
        return Err(Error::model_load(
            role,
            format!(
                "{} model takes {} features but the preprocessor produces {}",
                model.kind(),
                model.input_width(),
                expected_width
            ),
        ));
    }
    Ok(())
}
