//! Batch scoring command

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use spendwise_core::{score_csv, BatchSummary, Category, Config};

use super::load_pipeline;

pub fn cmd_batch(config: &Config, file: &Path, output: Option<&Path>) -> Result<()> {
    let pipeline = load_pipeline(config)?;

    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;

    let summary = match output {
        Some(path) => {
            let writer = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let summary = score_csv(&pipeline, reader, writer)?;
            println!("✅ Wrote {} scored rows to {}", summary.scored, path.display());
            summary
        }
        None => score_csv(&pipeline, reader, io::stdout().lock())?,
    };

    // Keep stdout clean for the CSV itself
    eprint!("{}", format_summary(&summary));
    Ok(())
}

pub fn format_summary(summary: &BatchSummary) -> String {
    let mut out = format!(
        "\n📊 Scored {} of {} households ({} skipped)\n",
        summary.scored, summary.rows, summary.skipped
    );
    for category in Category::all() {
        out.push_str(&format!(
            "   {:<20} {}\n",
            category.display_label(),
            summary.count(*category)
        ));
    }
    out.push_str(&format!(
        "   Models agreed on {} of {}\n",
        summary.agreements, summary.scored
    ));
    if !summary.skipped_lines.is_empty() {
        let lines: Vec<String> = summary.skipped_lines.iter().map(|l| l.to_string()).collect();
        out.push_str(&format!("   ⚠️  Skipped lines: {}\n", lines.join(", ")));
    }
    out
}
