//! Test utilities for spendwise-core
//!
//! Fixtures for unit tests here and for downstream crates (enable the
//! `test-utils` feature): a pipeline built from an identity preprocessor and
//! stub classifiers, plus the reference households.

use crate::classifier::StubClassifier;
use crate::features::FEATURE_SCHEMA;
use crate::models::{Category, RawFinancialInput};
use crate::pipeline::Pipeline;
use crate::preprocess::ColumnTransformer;

/// Pipeline whose models always answer `primary` and `secondary`
pub fn stub_pipeline(primary: Category, secondary: Category) -> Pipeline {
    let width = FEATURE_SCHEMA.len();
    Pipeline::new(
        Box::new(ColumnTransformer::passthrough(&FEATURE_SCHEMA)),
        Box::new(StubClassifier::new(primary, width)),
        Box::new(StubClassifier::new(secondary, width)),
    )
    .expect("stub pipeline matches the feature schema")
}

/// Income 50000 with 37000 of expenses (disposable 13000, savings goal 3900)
pub fn scenario_a() -> RawFinancialInput {
    RawFinancialInput {
        income: 50000,
        age: 30,
        dependents: 1,
        rent: 15000,
        loan_repayment: 5000,
        insurance: 2000,
        groceries: 6000,
        transport: 3000,
        eating_out: 2000,
        entertainment: 1000,
        utilities: 2000,
        healthcare: 1000,
        education: 0,
        miscellaneous: 0,
    }
}

/// Income 1000 against 1500 of expenses
pub fn scenario_c() -> RawFinancialInput {
    RawFinancialInput {
        income: 1000,
        rent: 1000,
        groceries: 500,
        ..Default::default()
    }
}
