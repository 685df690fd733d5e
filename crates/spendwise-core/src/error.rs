//! Error types for Spendwise

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Assembled record does not line up with the preprocessor's columns
    #[error("Schema mismatch: missing {missing:?}, unexpected {extra:?}, out of order {out_of_order:?}")]
    SchemaMismatch {
        /// Columns the schema expects that the record does not provide
        missing: Vec<String>,
        /// Columns the record provides (or the schema names) that are not known
        extra: Vec<String>,
        /// Columns present on both sides but at a different position
        out_of_order: Vec<String>,
    },

    #[error("Failed to load model artifact '{artifact}': {reason}")]
    ModelLoad { artifact: String, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn model_load(artifact: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            artifact: artifact.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by what the caller submitted
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
