//! Dense (fully connected) neural network
//!
//! Forward pass only. Each layer holds one weight row per output unit, so a
//! layer with `weights.len() == 8` and rows of length 17 maps 17 inputs to 8
//! outputs. The final layer's width is the class count.

use std::path::Path;

use serde::Deserialize;

use crate::artifacts::{read_artifact, ArtifactInfo, ArtifactRole};
use crate::error::{Error, Result};
use crate::models::FeatureVector;

use super::{softmax, Classifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Relu,
    Sigmoid,
    Tanh,
    Linear,
    Softmax,
}

impl Activation {
    fn apply(&self, values: Vec<f64>) -> Vec<f64> {
        match self {
            Self::Relu => values.into_iter().map(|v| v.max(0.0)).collect(),
            Self::Sigmoid => values
                .into_iter()
                .map(|v| 1.0 / (1.0 + (-v).exp()))
                .collect(),
            Self::Tanh => values.into_iter().map(f64::tanh).collect(),
            Self::Linear => values,
            Self::Softmax => softmax(&values),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    pub activation: Activation,
}

impl DenseLayer {
    fn input_width(&self) -> usize {
        self.weights.first().map(Vec::len).unwrap_or(0)
    }

    fn output_width(&self) -> usize {
        self.weights.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let z = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect();
        self.activation.apply(z)
    }
}

#[derive(Debug, Deserialize)]
struct RawNetwork {
    layers: Vec<DenseLayer>,
}

/// Feed-forward classifier loaded from a JSON artifact
#[derive(Debug, Clone)]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self> {
        let network = Self { layers };
        network.validate()?;
        Ok(network)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawNetwork = serde_json::from_str(json)
            .map_err(|e| Error::model_load("secondary", format!("invalid JSON: {}", e)))?;
        Self::new(raw.layers)
    }

    /// Load from disk, returning the model and its fingerprint
    pub fn from_file(path: &Path) -> Result<(Self, ArtifactInfo)> {
        let (contents, info) = read_artifact(ArtifactRole::Secondary, path)?;
        let model = Self::from_json(&contents).map_err(|e| match e {
            Error::ModelLoad { reason, .. } => Error::model_load(info.path.clone(), reason),
            other => other,
        })?;
        Ok((model, info))
    }

    /// Output of the final layer, before any normalization
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.layers
            .iter()
            .fold(input.to_vec(), |acc, layer| layer.forward(&acc))
    }

    fn validate(&self) -> Result<()> {
        let fail = |reason: String| Err(Error::model_load("secondary", reason));

        if self.layers.is_empty() {
            return fail("network has no layers".to_string());
        }

        let mut width = self.layers[0].input_width();
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.output_width() == 0 {
                return fail(format!("layer {} has no units", i));
            }
            if layer.bias.len() != layer.output_width() {
                return fail(format!(
                    "layer {} has {} units but {} biases",
                    i,
                    layer.output_width(),
                    layer.bias.len()
                ));
            }
            if let Some(row) = layer.weights.iter().position(|r| r.len() != width) {
                return fail(format!(
                    "layer {} unit {} takes {} inputs, expected {}",
                    i,
                    row,
                    layer.weights[row].len(),
                    width
                ));
            }
            let finite = layer
                .weights
                .iter()
                .flatten()
                .chain(&layer.bias)
                .all(|v| v.is_finite());
            if !finite {
                return fail(format!("layer {} has non-finite parameters", i));
            }
            width = layer.output_width();
        }

        if self.input_width() == 0 {
            return fail("network takes no inputs".to_string());
        }

        Ok(())
    }
}

impl Classifier for DenseNetwork {
    fn kind(&self) -> &'static str {
        "dense_network"
    }

    fn input_width(&self) -> usize {
        self.layers.first().map(DenseLayer::input_width).unwrap_or(0)
    }

    fn num_classes(&self) -> usize {
        self.layers.last().map(DenseLayer::output_width).unwrap_or(0)
    }

    fn probabilities(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let x = features.as_slice();
        if x.len() != self.input_width() {
            return Err(Error::Inference(format!(
                "dense network expects {} features, got {}",
                self.input_width(),
                x.len()
            )));
        }

        let output = self.forward(x);
        let last = self.layers.last().map(|l| l.activation);
        if last == Some(Activation::Softmax) {
            Ok(output)
        } else {
            Ok(softmax(&output))
        }
    }
}
