//! Stub classifier for testing
//!
//! Always answers with the same category, whatever the features. Lets the
//! pipeline be exercised without serialized model weights.

use crate::error::Result;
use crate::models::{Category, FeatureVector};

use super::Classifier;

/// Classifier that returns a fixed category
#[derive(Debug, Clone)]
pub struct StubClassifier {
    probabilities: Vec<f64>,
    input_width: usize,
}

impl StubClassifier {
    /// Predicts `category` with probability 0.8, splitting the rest evenly
    pub fn new(category: Category, input_width: usize) -> Self {
        let mut probabilities = vec![0.1; Category::COUNT];
        probabilities[category.index()] = 0.8;
        Self {
            probabilities,
            input_width,
        }
    }

    /// Return exactly these probabilities
    pub fn with_probabilities(probabilities: Vec<f64>, input_width: usize) -> Self {
        Self {
            probabilities,
            input_width,
        }
    }
}

impl Classifier for StubClassifier {
    fn kind(&self) -> &'static str {
        "stub"
    }

    fn input_width(&self) -> usize {
        self.input_width
    }

    fn num_classes(&self) -> usize {
        self.probabilities.len()
    }

    fn probabilities(&self, _features: &FeatureVector) -> Result<Vec<f64>> {
        Ok(self.probabilities.clone())
    }
}
