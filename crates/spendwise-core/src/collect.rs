//! Input collection
//!
//! Turns loosely-typed submissions (form fields, JSON objects, CSV rows) into a
//! validated [`RawFinancialInput`]. Every field must be a whole number that is
//! zero or greater. Blank or absent fields default to 0 and unknown names are
//! ignored, so a submit button or extra CSV column does not break collection.

use crate::error::{Error, Result};
use crate::models::{InputField, RawFinancialInput};

/// Collect from string key/value pairs (urlencoded form fields, CSV cells)
pub fn collect<'a, I>(fields: I) -> Result<RawFinancialInput>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut input = RawFinancialInput::default();

    for (name, raw) in fields {
        let Some(field) = InputField::from_column(name.trim()) else {
            continue;
        };
        input.set(field, parse_amount(field, raw)?);
    }

    Ok(input)
}

/// Collect from a JSON object keyed by column name
pub fn collect_json(object: &serde_json::Map<String, serde_json::Value>) -> Result<RawFinancialInput> {
    use serde_json::Value;

    let mut input = RawFinancialInput::default();

    for (name, value) in object {
        let Some(field) = InputField::from_column(name) else {
            continue;
        };
        let amount = match value {
            Value::Null => 0,
            Value::Number(n) => match n.as_u64() {
                Some(v) => v,
                None => whole_number(field, n.as_f64().unwrap_or(f64::NAN))?,
            },
            Value::String(s) => parse_amount(field, s)?,
            other => {
                return Err(Error::invalid_input(
                    field.as_str(),
                    format!("expected a number, got {}", json_kind(other)),
                ))
            }
        };
        input.set(field, amount);
    }

    Ok(input)
}

fn parse_amount(field: InputField, raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    if let Ok(v) = trimmed.parse::<u64>() {
        return Ok(v);
    }

    match trimmed.parse::<f64>() {
        Ok(v) => whole_number(field, v),
        Err(_) => Err(Error::invalid_input(
            field.as_str(),
            format!("'{}' is not a number", trimmed),
        )),
    }
}

/// Accept floats like `1500.0`; reject negatives, fractions and non-finite values
fn whole_number(field: InputField, value: f64) -> Result<u64> {
    if !value.is_finite() {
        return Err(Error::invalid_input(field.as_str(), "must be a finite number"));
    }
    if value < 0.0 {
        return Err(Error::invalid_input(field.as_str(), "must be zero or greater"));
    }
    if value.fract() != 0.0 {
        return Err(Error::invalid_input(field.as_str(), "must be a whole number"));
    }
    if value >= u64::MAX as f64 {
        return Err(Error::invalid_input(field.as_str(), "is too large"));
    }
    Ok(value as u64)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
        _ => "an unsupported value",
    }
}
