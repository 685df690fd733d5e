//! Pre-fitted preprocessing transform
//!
//! The preprocessor converts a named [`FeatureRecord`] into the numeric
//! [`FeatureVector`] the classifiers were trained on. It is loaded, never
//! fitted, by this crate.
//!
//! # Artifact format
//!
//! ```json
//! {
//!   "schema_version": 1,
//!   "columns": [
//!     { "name": "Income", "transform": "standard", "mean": 41585.5, "scale": 40014.5 },
//!     { "name": "Age", "transform": "min_max", "min": 18, "max": 64 },
//!     { "name": "Dependents", "transform": "passthrough" }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::artifacts::{read_artifact, ArtifactInfo, ArtifactRole};
use crate::error::{Error, Result};
use crate::features::SCHEMA_VERSION;
use crate::models::{FeatureRecord, FeatureVector};

/// A deterministic, pre-fitted column transform
pub trait Preprocessor: Send + Sync {
    /// Ordered column names the transform was fitted on
    fn schema(&self) -> &[String];

    /// Length of the vectors produced by [`Preprocessor::transform`]
    fn output_width(&self) -> usize;

    /// Transform a record whose columns already match [`Preprocessor::schema`]
    fn transform(&self, record: &FeatureRecord) -> Result<FeatureVector>;
}

/// Per-column scaling
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "transform", rename_all = "snake_case")]
pub enum ColumnScaling {
    /// `(x - mean) / scale`; a zero scale is treated as 1
    Standard { mean: f64, scale: f64 },
    /// `(x - min) / (max - min)`; a zero range maps to 0
    MinMax { min: f64, max: f64 },
    Passthrough,
}

impl ColumnScaling {
    pub fn apply(&self, x: f64) -> f64 {
        match *self {
            Self::Standard { mean, scale } => {
                let scale = if scale == 0.0 { 1.0 } else { scale };
                (x - mean) / scale
            }
            Self::MinMax { min, max } => {
                let range = max - min;
                if range == 0.0 {
                    0.0
                } else {
                    (x - min) / range
                }
            }
            Self::Passthrough => x,
        }
    }

    fn is_finite(&self) -> bool {
        match *self {
            Self::Standard { mean, scale } => mean.is_finite() && scale.is_finite(),
            Self::MinMax { min, max } => min.is_finite() && max.is_finite(),
            Self::Passthrough => true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawColumn {
    name: String,
    #[serde(flatten)]
    scaling: ColumnScaling,
}

#[derive(Debug, Deserialize)]
struct RawTransformer {
    schema_version: u32,
    columns: Vec<RawColumn>,
}

/// Column-wise transformer loaded from a JSON artifact
#[derive(Debug, Clone)]
pub struct ColumnTransformer {
    names: Vec<String>,
    scalings: Vec<ColumnScaling>,
}

impl ColumnTransformer {
    /// Build from explicit columns
    pub fn new(columns: Vec<(String, ColumnScaling)>) -> Result<Self> {
        let (names, scalings): (Vec<_>, Vec<_>) = columns.into_iter().unzip();
        let transformer = Self { names, scalings };
        transformer.validate()?;
        Ok(transformer)
    }

    /// Identity transform over the given columns
    pub fn passthrough<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            names: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            scalings: vec![ColumnScaling::Passthrough; columns.len()],
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawTransformer = serde_json::from_str(json)
            .map_err(|e| Error::model_load("preprocessor", format!("invalid JSON: {}", e)))?;

        if raw.schema_version != SCHEMA_VERSION {
            return Err(Error::model_load(
                "preprocessor",
                format!(
                    "schema version {} is not supported (expected {})",
                    raw.schema_version, SCHEMA_VERSION
                ),
            ));
        }

        Self::new(
            raw.columns
                .into_iter()
                .map(|c| (c.name, c.scaling))
                .collect(),
        )
    }

    /// Load from disk, returning the transformer and its fingerprint
    pub fn from_file(path: &Path) -> Result<(Self, ArtifactInfo)> {
        let (contents, info) = read_artifact(ArtifactRole::Preprocessor, path)?;
        let transformer = Self::from_json(&contents).map_err(|e| match e {
            Error::ModelLoad { reason, .. } => Error::model_load(info.path.clone(), reason),
            other => other,
        })?;
        Ok((transformer, info))
    }

    fn validate(&self) -> Result<()> {
        if self.names.is_empty() {
            return Err(Error::model_load("preprocessor", "no columns defined"));
        }

        let mut seen = HashSet::new();
        for (name, scaling) in self.names.iter().zip(&self.scalings) {
            if !seen.insert(name.as_str()) {
                return Err(Error::model_load(
                    "preprocessor",
                    format!("column '{}' is declared twice", name),
                ));
            }
            if !scaling.is_finite() {
                return Err(Error::model_load(
                    "preprocessor",
                    format!("column '{}' has non-finite parameters", name),
                ));
            }
        }
        Ok(())
    }
}

impl Preprocessor for ColumnTransformer {
    fn schema(&self) -> &[String] {
        &self.names
    }

    fn output_width(&self) -> usize {
        self.names.len()
    }

    fn transform(&self, record: &FeatureRecord) -> Result<FeatureVector> {
        if record.len() != self.names.len() {
            return Err(Error::Inference(format!(
                "preprocessor expects {} columns, record has {}",
                self.names.len(),
                record.len()
            )));
        }

        let values = record
            .values()
            .iter()
            .zip(&self.scalings)
            .map(|(x, scaling)| scaling.apply(*x))
            .collect();

        Ok(FeatureVector::new(values))
    }
}
