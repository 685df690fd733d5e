//! Display formatting for amounts and percentages

/// Rupee amount rounded to whole units with thousands separators
///
/// `13000.0` renders as `₹13,000` and `-500.0` as `₹-500`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "₹—".to_string();
    }

    let rounded = format!("{:.0}", value.abs());
    let negative = value < 0.0 && rounded.chars().any(|c| c != '0');

    format!(
        "₹{}{}",
        if negative { "-" } else { "" },
        group_thousands(&rounded)
    )
}

/// Percentage with two decimals (`7.80%`)
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
