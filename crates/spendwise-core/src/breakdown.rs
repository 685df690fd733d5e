//! Expense breakdown
//!
//! Amount and share of total expense for each of the 11 expense categories,
//! in form order. Feeds the dashboard bars and the JSON response.

use serde::Serialize;

use crate::models::RawFinancialInput;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseShare {
    /// Column name ("Eating_Out")
    pub field: &'static str,
    /// Display label ("Eating Out")
    pub label: &'static str,
    pub amount: u64,
    /// Percent of total expense; 0 when nothing was spent
    pub share: f64,
}

pub fn expense_breakdown(input: &RawFinancialInput) -> Vec<ExpenseShare> {
    let total: f64 = input.expenses().map(|(_, amount)| amount as f64).sum();

    input
        .expenses()
        .map(|(field, amount)| ExpenseShare {
            field: field.as_str(),
            label: field.label(),
            amount,
            share: if total > 0.0 {
                amount as f64 / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}
