//! Recommendation returned for one household

use serde::Serialize;

use crate::advice::Advice;
use crate::breakdown::ExpenseShare;
use crate::classifier::Prediction;
use crate::format::{format_currency, format_percent};
use crate::models::{Category, DerivedMetrics, RawFinancialInput};

/// What one classifier said
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelVerdict {
    /// Model family ("tree_ensemble", "dense_network")
    pub model: String,
    pub category: Category,
    pub label: String,
    pub display_label: String,
    pub confidence: f64,
    pub probabilities: Vec<f64>,
}

impl ModelVerdict {
    pub fn new(model: &str, prediction: Prediction) -> Self {
        Self {
            model: model.to_string(),
            category: prediction.category,
            label: prediction.category.label().to_string(),
            display_label: prediction.category.display_label(),
            confidence: prediction.confidence(),
            probabilities: prediction.probabilities,
        }
    }
}

/// Derived metrics rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedMetrics {
    pub total_expense: String,
    pub disposable_income: String,
    pub desired_savings: String,
    pub desired_savings_percentage: String,
}

impl From<&DerivedMetrics> for FormattedMetrics {
    fn from(derived: &DerivedMetrics) -> Self {
        Self {
            total_expense: format_currency(derived.total_expense),
            disposable_income: format_currency(derived.disposable_income),
            desired_savings: format_currency(derived.desired_savings),
            desired_savings_percentage: format_percent(derived.desired_savings_percentage),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Values as collected, for re-display
    pub input: RawFinancialInput,
    pub derived: DerivedMetrics,
    /// Drives the advice
    pub primary: ModelVerdict,
    /// Shown alongside, never used for advice
    pub secondary: ModelVerdict,
    pub models_agree: bool,
    pub advice: Advice,
    pub formatted: FormattedMetrics,
    pub breakdown: Vec<ExpenseShare>,
}

impl Recommendation {
    pub fn category(&self) -> Category {
        self.primary.category
    }
}
