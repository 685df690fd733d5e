//! Derived metrics
//!
//! Pure arithmetic over the raw household figures. There is no error path:
//! zero income yields a savings percentage of 0, and expenses above income
//! produce negative disposable income and savings.

use crate::models::{DerivedMetrics, RawFinancialInput};

/// Share of disposable income treated as the savings target
pub const SAVINGS_RATE: f64 = 0.3;

/// Compute the derived metrics for one household
pub fn compute(input: &RawFinancialInput) -> DerivedMetrics {
    let total_expense: f64 = input.expenses().map(|(_, amount)| amount as f64).sum();
    let income = input.income as f64;

    let disposable_income = income - total_expense;
    let desired_savings = disposable_income * SAVINGS_RATE;
    let desired_savings_percentage = if input.income > 0 {
        desired_savings / income * 100.0
    } else {
        0.0
    };

    DerivedMetrics {
        total_expense,
        disposable_income,
        desired_savings,
        desired_savings_percentage,
    }
}
