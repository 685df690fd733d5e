//! Status command implementations (check, schema)

use anyhow::Result;

use spendwise_core::{feature_schema, Config, RawFinancialInput, SCHEMA_VERSION};

use super::load_pipeline;

pub fn cmd_check(config: &Config) -> Result<()> {
    println!();
    println!("🔍 Checking model artifacts");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Directory: {}", config.artifacts.dir.display());

    let pipeline = load_pipeline(config)?;

    for artifact in pipeline.artifacts() {
        println!(
            "   ✅ {:<13} {} ({} bytes, sha256 {})",
            artifact.role.as_str(),
            artifact.path,
            artifact.bytes,
            artifact.short_digest()
        );
    }

    println!();
    println!(
        "   Schema: v{} ({} columns)",
        SCHEMA_VERSION,
        pipeline.schema().len()
    );
    println!("   Primary model: {}", pipeline.primary_kind());
    println!("   Secondary model: {}", pipeline.secondary_kind());

    // An all-zero household must run end to end
    let smoke = pipeline.run(&RawFinancialInput::default())?;
    println!(
        "   Smoke test: all-zero household → {}",
        smoke.primary.display_label
    );

    println!();
    println!("✅ All artifacts loaded and consistent");
    Ok(())
}

pub fn cmd_schema() -> Result<()> {
    println!("📋 Feature schema v{}", SCHEMA_VERSION);
    for (i, column) in feature_schema().iter().enumerate() {
        println!("   {:>2}. {}", i + 1, column);
    }
    Ok(())
}
