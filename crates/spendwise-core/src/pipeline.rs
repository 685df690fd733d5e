//! Recommendation pipeline
//!
//! Owns the preprocessor and both classifiers for the life of the process.
//! A pipeline is only constructed once every artifact has loaded and the
//! shapes line up, so a running server never holds a partial one.
//!
//! Per submission: compute derived metrics, assemble the record in the
//! preprocessor's column order, check it against that order, transform, then
//! run both classifiers. Only the primary prediction selects the advice.

use tracing::{debug, info};

use crate::advice::advice_for;
use crate::artifacts::{ArtifactInfo, ArtifactPaths};
use crate::breakdown::expense_breakdown;
use crate::classifier::{check_shape, Classifier, DenseNetwork, Prediction, TreeEnsemble};
use crate::error::{Error, Result};
use crate::features::{assemble, check_schema, FEATURE_SCHEMA};
use crate::metrics::compute;
use crate::models::{DerivedMetrics, RawFinancialInput};
use crate::preprocess::{ColumnTransformer, Preprocessor};
use crate::recommendation::{FormattedMetrics, ModelVerdict, Recommendation};

/// Both classifiers' answers for one household
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub derived: DerivedMetrics,
    pub primary: Prediction,
    pub secondary: Prediction,
}

pub struct Pipeline {
    preprocessor: Box<dyn Preprocessor>,
    primary: Box<dyn Classifier>,
    secondary: Box<dyn Classifier>,
    artifacts: Vec<ArtifactInfo>,
}

impl Pipeline {
    /// Assemble a pipeline from already-loaded components
    ///
    /// Fails with [`Error::ModelLoad`] if the preprocessor's columns differ
    /// from [`FEATURE_SCHEMA`] or a classifier does not fit its output.
    pub fn new(
        preprocessor: Box<dyn Preprocessor>,
        primary: Box<dyn Classifier>,
        secondary: Box<dyn Classifier>,
    ) -> Result<Self> {
        if let Err(e) = check_schema(&FEATURE_SCHEMA, preprocessor.schema()) {
            return Err(Error::model_load("preprocessor", e.to_string()));
        }

        let width = preprocessor.output_width();
        check_shape(&*primary, "primary", width)?;
        check_shape(&*secondary, "secondary", width)?;

        Ok(Self {
            preprocessor,
            primary,
            secondary,
            artifacts: Vec::new(),
        })
    }

    /// Load all three artifacts from disk
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let (preprocessor, pre_info) = ColumnTransformer::from_file(&paths.preprocessor)?;
        let (primary, primary_info) = TreeEnsemble::from_file(&paths.primary)?;
        let (secondary, secondary_info) = DenseNetwork::from_file(&paths.secondary)?;

        let mut pipeline = Self::new(
            Box::new(preprocessor),
            Box::new(primary),
            Box::new(secondary),
        )?;
        pipeline.artifacts = vec![pre_info, primary_info, secondary_info];

        for artifact in &pipeline.artifacts {
            info!(
                role = %artifact.role,
                path = %artifact.path,
                sha256 = %artifact.short_digest(),
                "Loaded model artifact"
            );
        }
        info!(
            columns = pipeline.schema().len(),
            primary = pipeline.primary.kind(),
            secondary = pipeline.secondary.kind(),
            "Pipeline ready"
        );

        Ok(pipeline)
    }

    /// Column order the preprocessor expects
    pub fn schema(&self) -> &[String] {
        self.preprocessor.schema()
    }

    /// Fingerprints of the loaded artifacts (empty when built in memory)
    pub fn artifacts(&self) -> &[ArtifactInfo] {
        &self.artifacts
    }

    pub fn primary_kind(&self) -> &'static str {
        self.primary.kind()
    }

    pub fn secondary_kind(&self) -> &'static str {
        self.secondary.kind()
    }

    /// Run both classifiers without building the presentation parts
    pub fn classify(&self, input: &RawFinancialInput) -> Result<Classification> {
        let derived = compute(input);

        let record = assemble(input, &derived, self.preprocessor.schema())?;
        check_schema(self.preprocessor.schema(), record.names())?;
        let features = self.preprocessor.transform(&record)?;

        let primary = self.primary.predict(&features)?;
        let secondary = self.secondary.predict(&features)?;

        debug!(
            primary = %primary.category,
            secondary = %secondary.category,
            confidence = primary.confidence(),
            "Classified household"
        );

        Ok(Classification {
            derived,
            primary,
            secondary,
        })
    }

    /// Full recommendation for one household
    pub fn run(&self, input: &RawFinancialInput) -> Result<Recommendation> {
        let Classification {
            derived,
            primary,
            secondary,
        } = self.classify(input)?;

        let advice = advice_for(primary.category, &derived);
        let models_agree = primary.category == secondary.category;

        Ok(Recommendation {
            input: *input,
            derived,
            primary: ModelVerdict::new(self.primary.kind(), primary),
            secondary: ModelVerdict::new(self.secondary.kind(), secondary),
            models_agree,
            advice,
            formatted: FormattedMetrics::from(&derived),
            breakdown: expense_breakdown(input),
        })
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("schema", &self.schema())
            .field("primary", &self.primary.kind())
            .field("secondary", &self.secondary.kind())
            .field("artifacts", &self.artifacts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::StubClassifier;
    use crate::models::Category;
    use crate::test_utils::{scenario_a, stub_pipeline};

    #[test]
    fn test_primary_alone_selects_advice() {
        for primary in Category::all() {
            for secondary in Category::all() {
                let pipeline = stub_pipeline(*primary, *secondary);
                let rec = pipeline.run(&scenario_a()).unwrap();
                assert_eq!(rec.category(), *primary);
                assert_eq!(rec.advice.category, *primary);
                assert_eq!(rec.secondary.category, *secondary);
                assert_eq!(rec.models_agree, primary == secondary);
            }
        }
    }

    #[test]
    fn test_run_fills_metrics_and_breakdown() {
        let pipeline = stub_pipeline(Category::HeavySpender, Category::Saver);
        let rec = pipeline.run(&scenario_a()).unwrap();

        assert_eq!(rec.derived.total_expense, 37000.0);
        assert_eq!(rec.formatted.disposable_income, "₹13,000");
        assert_eq!(rec.formatted.desired_savings, "₹3,900");
        assert_eq!(rec.formatted.desired_savings_percentage, "7.80%");
        assert_eq!(rec.breakdown.len(), 11);
        assert_eq!(rec.input, scenario_a());
        assert_eq!(rec.primary.model, "stub");
        assert!(rec.advice.points[1].contains("₹3,900"));
    }

    #[test]
    fn test_new_rejects_schema_drift() {
        let mut columns: Vec<&str> = FEATURE_SCHEMA.to_vec();
        columns.swap(0, 1);
        let err = Pipeline::new(
            Box::new(ColumnTransformer::passthrough(columns.as_slice())),
            Box::new(StubClassifier::new(Category::Saver, 17)),
            Box::new(StubClassifier::new(Category::Saver, 17)),
        )
        .unwrap_err();

        match err {
            Error::ModelLoad { artifact, reason } => {
                assert_eq!(artifact, "preprocessor");
                assert!(reason.contains("Income"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_new_rejects_width_mismatch() {
        let err = Pipeline::new(
            Box::new(ColumnTransformer::passthrough(&FEATURE_SCHEMA)),
            Box::new(StubClassifier::new(Category::Saver, 17)),
            Box::new(StubClassifier::new(Category::Saver, 16)),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ModelLoad { ref artifact, .. } if artifact == "secondary"));
    }

    #[test]
    fn test_unknown_column_fails_before_transform() {
        // Bypasses the startup check to simulate drift at request time
        let mut columns = crate::features::feature_schema();
        columns.push("Credit_Score".to_string());
        let pipeline = Pipeline {
            preprocessor: Box::new(ColumnTransformer::passthrough(columns.as_slice())),
            primary: Box::new(StubClassifier::new(Category::Saver, 18)),
            secondary: Box::new(StubClassifier::new(Category::Saver, 18)),
            artifacts: Vec::new(),
        };

        match pipeline.run(&scenario_a()).unwrap_err() {
            Error::SchemaMismatch { missing, .. } => assert_eq!(missing, vec!["Credit_Score"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_income_runs() {
        let pipeline = stub_pipeline(Category::ModerateSpender, Category::ModerateSpender);
        let rec = pipeline.run(&RawFinancialInput::default()).unwrap();
        assert_eq!(rec.derived.desired_savings_percentage, 0.0);
        assert_eq!(rec.formatted.desired_savings_percentage, "0.00%");
    }
}
