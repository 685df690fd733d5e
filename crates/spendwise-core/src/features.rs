//! Feature assembly and schema checks
//!
//! The preprocessor was fitted on a fixed, ordered set of columns. This module
//! owns the versioned copy of that column list and the two checks around it:
//! [`assemble`] builds a record for any schema drawn from the raw and derived
//! fields, and [`check_schema`] compares two column lists and reports exactly
//! what is missing, unexpected or out of order.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::models::{DerivedField, DerivedMetrics, FeatureRecord, InputField, RawFinancialInput};

/// Version of [`FEATURE_SCHEMA`]; bump together with the column list
pub const SCHEMA_VERSION: u32 = 1;

/// Columns the shipped preprocessor is fitted on, in order
pub const FEATURE_SCHEMA: [&str; 17] = [
    "Income",
    "Age",
    "Dependents",
    "Rent",
    "Loan_Repayment",
    "Insurance",
    "Groceries",
    "Transport",
    "Eating_Out",
    "Entertainment",
    "Utilities",
    "Healthcare",
    "Education",
    "Miscellaneous",
    "Disposable_Income",
    "Desired_Savings",
    "Desired_Savings_Percentage",
];

/// The schema as owned strings
pub fn feature_schema() -> Vec<String> {
    FEATURE_SCHEMA.iter().map(|s| s.to_string()).collect()
}

/// Value of a column drawn from the raw input or the derived metrics
pub fn lookup(input: &RawFinancialInput, derived: &DerivedMetrics, name: &str) -> Option<f64> {
    if let Some(field) = InputField::from_column(name) {
        return Some(input.get(field) as f64);
    }
    DerivedField::from_column(name).map(|field| derived.get(field))
}

/// Build a record with exactly the columns named in `schema`, in that order
///
/// Fails with [`Error::SchemaMismatch`] listing every schema column that is
/// neither a raw input field nor a derived metric.
pub fn assemble<S: AsRef<str>>(
    input: &RawFinancialInput,
    derived: &DerivedMetrics,
    schema: &[S],
) -> Result<FeatureRecord> {
    let mut names = Vec::with_capacity(schema.len());
    let mut values = Vec::with_capacity(schema.len());
    let mut unknown = Vec::new();

    for column in schema {
        let column = column.as_ref();
        match lookup(input, derived, column) {
            Some(value) => {
                names.push(column.to_string());
                values.push(value);
            }
            None => unknown.push(column.to_string()),
        }
    }

    if !unknown.is_empty() {
        return Err(Error::SchemaMismatch {
            missing: unknown,
            extra: vec![],
            out_of_order: vec![],
        });
    }

    Ok(FeatureRecord::new(names, values))
}

/// Compare the columns a consumer expects with the columns it is given
///
/// Both the column set and the order must match. Nothing is dropped, padded
/// or reordered to make them fit.
pub fn check_schema<E: AsRef<str>, A: AsRef<str>>(expected: &[E], actual: &[A]) -> Result<()> {
    let expected: Vec<&str> = expected.iter().map(|c| c.as_ref()).collect();
    let actual: Vec<&str> = actual.iter().map(|c| c.as_ref()).collect();

    if expected == actual {
        return Ok(());
    }

    let expected_set: HashSet<&str> = expected.iter().copied().collect();
    let actual_set: HashSet<&str> = actual.iter().copied().collect();

    let mut missing: Vec<String> = expected
        .iter()
        .filter(|c| !actual_set.contains(*c))
        .map(|c| c.to_string())
        .collect();
    let mut extra: Vec<String> = actual
        .iter()
        .filter(|c| !expected_set.contains(*c))
        .map(|c| c.to_string())
        .collect();

    // Shared columns repeated more often on one side
    let expected_counts = occurrences(&expected);
    let actual_counts = occurrences(&actual);
    let mut seen = HashSet::new();
    for column in expected.iter().chain(&actual) {
        if !seen.insert(*column) {
            continue;
        }
        let (Some(&e), Some(&a)) = (expected_counts.get(column), actual_counts.get(column)) else {
            continue;
        };
        if a > e {
            extra.push(column.to_string());
        } else if e > a {
            missing.push(column.to_string());
        }
    }

    // Relative order of the shared columns
    let shared_expected = expected.iter().filter(|c| actual_set.contains(*c));
    let shared_actual = actual.iter().filter(|c| expected_set.contains(*c));
    let out_of_order: Vec<String> = shared_expected
        .zip(shared_actual)
        .filter(|(e, a)| e != a)
        .map(|(e, _)| e.to_string())
        .collect();

    Err(Error::SchemaMismatch {
        missing,
        extra,
        out_of_order,
    })
}

fn occurrences<'a>(columns: &[&'a str]) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for column in columns {
        *counts.entry(*column).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute;

    fn household() -> RawFinancialInput {
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
            ..Default::default()
        }
    }

    #[test]
    fn test_assemble_full_schema_in_order() {
        let input = household();
        let derived = compute(&input);
        let record = assemble(&input, &derived, &FEATURE_SCHEMA).unwrap();

        assert_eq!(record.len(), FEATURE_SCHEMA.len());
        assert_eq!(record.names(), feature_schema().as_slice());
        assert_eq!(record.get("Income"), Some(50000.0));
        assert_eq!(record.get("Disposable_Income"), Some(13000.0));
        assert_eq!(record.values()[2], 1.0);
    }

    #[test]
    fn test_assemble_follows_schema_order() {
        let input = household();
        let derived = compute(&input);
        let record = assemble(&input, &derived, &["Total_Expense", "Age", "Income"]).unwrap();

        assert_eq!(record.names(), ["Total_Expense", "Age", "Income"]);
        assert_eq!(record.values(), [37000.0, 30.0, 50000.0]);
    }

    #[test]
    fn test_assemble_allows_subset() {
        let input = household();
        let derived = compute(&input);
        let record = assemble(&input, &derived, &["Rent"]).unwrap();
        assert_eq!(record.values(), [15000.0]);
    }

    #[test]
    fn test_assemble_unknown_field_is_schema_mismatch() {
        let input = household();
        let derived = compute(&input);
        let err = assemble(&input, &derived, &["Income", "Occupation", "City_Tier"]).unwrap_err();

        match err {
            Error::SchemaMismatch { missing, .. } => {
                assert_eq!(missing, vec!["Occupation", "City_Tier"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_schema_identical() {
        assert!(check_schema(&FEATURE_SCHEMA, feature_schema().as_slice()).is_ok());
    }

    #[test]
    fn test_check_schema_reports_missing_and_extra() {
        let err = check_schema(&["Income", "Age", "Rent"], &["Income", "Rent", "Salary"]).unwrap_err();
        match err {
            Error::SchemaMismatch { missing, extra, .. } => {
                assert_eq!(missing, vec!["Age"]);
                assert_eq!(extra, vec!["Salary"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_schema_reports_reordering() {
        let err = check_schema(&["Income", "Age", "Rent"], &["Income", "Rent", "Age"]).unwrap_err();
        match err {
            Error::SchemaMismatch {
                missing,
                extra,
                out_of_order,
            } => {
                assert!(missing.is_empty());
                assert!(extra.is_empty());
                assert_eq!(out_of_order, vec!["Age", "Rent"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_schema_rejects_duplicates() {
        match check_schema(&["Income", "Age"], &["Income", "Age", "Age"]).unwrap_err() {
            Error::SchemaMismatch {
                missing,
                extra,
                out_of_order,
            } => {
                assert!(missing.is_empty());
                assert_eq!(extra, vec!["Age".to_string()]);
                assert!(out_of_order.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = check_schema(&["Rent", "Rent", "Age"], &["Rent", "Age"]).unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaMismatch { ref missing, .. } if missing == &vec!["Rent".to_string()]
        ));
    }
}
