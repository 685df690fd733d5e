//! Batch scoring of households from CSV
//!
//! The header row names the input columns (same names as the form). Each
//! data row is collected, classified by both models and written out with its
//! derived metrics. Rows with invalid values are skipped with a warning.

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Serialize;
use tracing::{debug, warn};

use crate::collect::collect;
use crate::error::Result;
use crate::models::{Category, DerivedField, InputField};
use crate::pipeline::Pipeline;

/// Counts reported after a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub rows: usize,
    pub scored: usize,
    pub skipped: usize,
    /// Source line of each skipped row, counting the header as line 1
    pub skipped_lines: Vec<u64>,
    /// Primary predictions per class index
    pub by_category: [usize; Category::COUNT],
    /// Rows where both models agreed
    pub agreements: usize,
}

impl BatchSummary {
    pub fn count(&self, category: Category) -> usize {
        self.by_category[category.index()]
    }
}

fn output_header() -> Vec<&'static str> {
    let mut header: Vec<&'static str> = InputField::all().iter().map(|f| f.as_str()).collect();
    header.extend(DerivedField::all().iter().map(|f| f.as_str()));
    header.extend([
        "Primary_Category",
        "Primary_Confidence",
        "Secondary_Category",
        "Secondary_Confidence",
        "Models_Agree",
    ]);
    header
}

/// Score every row of `reader`, writing results to `writer`
pub fn score_csv<R: Read, W: Write>(
    pipeline: &Pipeline,
    reader: R,
    writer: W,
) -> Result<BatchSummary> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut wtr = WriterBuilder::new().from_writer(writer);

    let headers = rdr.headers()?.clone();
    wtr.write_record(output_header())?;

    let mut summary = BatchSummary::default();

    for result in rdr.records() {
        let record = result?;
        summary.rows += 1;
        let line = record.position().map_or(0, |p| p.line());

        let input = match collect(fields(&headers, &record)) {
            Ok(input) => input,
            Err(e) if e.is_client_error() => {
                warn!(line, error = %e, "Skipping row");
                summary.skipped += 1;
                summary.skipped_lines.push(line);
                continue;
            }
            Err(e) => return Err(e),
        };

        let classified = pipeline.classify(&input)?;
        let agree = classified.primary.category == classified.secondary.category;

        let mut row: Vec<String> = InputField::all()
            .iter()
            .map(|f| input.get(*f).to_string())
            .collect();
        row.extend(
            DerivedField::all()
                .iter()
                .map(|f| classified.derived.get(*f).to_string()),
        );
        row.extend([
            classified.primary.category.to_string(),
            format!("{:.4}", classified.primary.confidence()),
            classified.secondary.category.to_string(),
            format!("{:.4}", classified.secondary.confidence()),
            agree.to_string(),
        ]);
        wtr.write_record(&row)?;

        summary.scored += 1;
        summary.by_category[classified.primary.category.index()] += 1;
        if agree {
            summary.agreements += 1;
        }
    }

    wtr.flush()?;
    debug!(
        rows = summary.rows,
        scored = summary.scored,
        skipped = summary.skipped,
        "Batch scoring finished"
    );
    Ok(summary)
}

fn fields<'a>(
    headers: &'a StringRecord,
    record: &'a StringRecord,
) -> impl Iterator<Item = (&'a str, &'a str)> {
    headers.iter().zip(record.iter())
}
