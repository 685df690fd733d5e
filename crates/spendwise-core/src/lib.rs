//! Spendwise Core Library
//!
//! Shared functionality for the Spendwise spending-behavior recommender:
//! - Input collection and validation for the 14 household fields
//! - Derived metrics (total expense, disposable income, savings target)
//! - Versioned feature schema and record assembly
//! - Pre-fitted preprocessor and pre-trained classifiers loaded from JSON
//! - Advice, formatting and expense breakdown for presentation
//! - Batch scoring from CSV
//! - Config resolution with embedded defaults

pub mod advice;
pub mod artifacts;
pub mod batch;
pub mod breakdown;
pub mod classifier;
pub mod collect;
pub mod config;
pub mod error;
pub mod features;
pub mod format;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod preprocess;
pub mod recommendation;

/// Test utilities including a stub pipeline
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use advice::{advice_for, Advice, GUIDELINES};
pub use artifacts::{ArtifactInfo, ArtifactPaths, ArtifactRole};
pub use batch::{score_csv, BatchSummary};
pub use breakdown::{expense_breakdown, ExpenseShare};
pub use classifier::{
    Classifier, DenseNetwork, Prediction, StubClassifier, TreeEnsemble,
};
pub use collect::{collect, collect_json};
pub use config::{Config, MODEL_DIR_ENV};
pub use error::{Error, Result};
pub use features::{assemble, check_schema, feature_schema, FEATURE_SCHEMA, SCHEMA_VERSION};
pub use format::{format_currency, format_percent};
pub use metrics::{compute, SAVINGS_RATE};
pub use models::{
    Category, DerivedField, DerivedMetrics, FeatureRecord, FeatureVector, InputField,
    RawFinancialInput,
};
pub use pipeline::{Classification, Pipeline};
pub use preprocess::{ColumnScaling, ColumnTransformer, Preprocessor};
pub use recommendation::{FormattedMetrics, ModelVerdict, Recommendation};
