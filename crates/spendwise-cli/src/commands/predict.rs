//! Single-household prediction command

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use spendwise_core::{collect_json, Config, RawFinancialInput, Recommendation};

use super::load_pipeline;

/// Read a household from a JSON object keyed by column name
pub fn read_input_file(path: &Path) -> Result<RawFinancialInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let Some(object) = value.as_object() else {
        bail!("{} must contain a JSON object", path.display());
    };

    Ok(collect_json(object)?)
}

pub fn cmd_predict(config: &Config, input: &RawFinancialInput, json: bool) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    let recommendation = pipeline.run(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        print!("{}", format_report(&recommendation));
    }

    Ok(())
}

/// Human-readable report for the terminal
pub fn format_report(rec: &Recommendation) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&format!("🧠 Predicted Category: {}\n", rec.primary.display_label));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");
    out.push_str(&format!(
        "   Trees:          {} ({:.0}%)\n",
        rec.primary.label,
        rec.primary.confidence * 100.0
    ));
    out.push_str(&format!(
        "   Neural network: {} ({:.0}%){}\n",
        rec.secondary.label,
        rec.secondary.confidence * 100.0,
        if rec.models_agree { "" } else { "  ⚠️  models disagree" }
    ));

    out.push('\n');
    out.push_str(&format!("   💳 Total Expense:      {}\n", rec.formatted.total_expense));
    out.push_str(&format!("   💵 Disposable Income:  {}\n", rec.formatted.disposable_income));
    out.push_str(&format!("   💸 Desired Savings:    {}\n", rec.formatted.desired_savings));
    out.push_str(&format!(
        "   📈 Desired Savings %:  {}\n",
        rec.formatted.desired_savings_percentage
    ));

    let spent: Vec<_> = rec.breakdown.iter().filter(|s| s.amount > 0).collect();
    if !spent.is_empty() {
        out.push('\n');
        out.push_str("📊 Expense Breakdown\n");
        for share in spent {
            let bar = "█".repeat((share.share / 5.0).round() as usize);
            out.push_str(&format!(
                "   {:<15} {:>5.1}%  {}\n",
                share.label, share.share, bar
            ));
        }
    }

    out.push('\n');
    out.push_str(&format!("💡 Personal Advice for {}\n", rec.advice.display_label));
    for point in &rec.advice.points {
        out.push_str(&format!("   • {}\n", point));
    }

    out.push('\n');
    out.push_str("📘 Financial Guidelines\n");
    for guideline in &rec.advice.guidelines {
        out.push_str(&format!("   • {}\n", guideline));
    }
    out.push('\n');

    out
}
