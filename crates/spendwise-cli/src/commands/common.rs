//! Shared command utilities

use std::path::Path;

use anyhow::{Context, Result};

use spendwise_core::{Config, Pipeline};

/// Resolve config file, environment and `--model-dir`, in rising priority
pub fn resolve_config(config_path: Option<&Path>, model_dir: Option<&Path>) -> Result<Config> {
    let mut config = Config::load(config_path).context("Failed to load configuration")?;
    if let Some(dir) = model_dir {
        config.artifacts.dir = dir.to_path_buf();
    }
    Ok(config)
}

/// Load all model artifacts or fail with the offending file named
pub fn load_pipeline(config: &Config) -> Result<Pipeline> {
    let paths = config.artifact_paths();
    Pipeline::load(&paths).with_context(|| {
        format!(
            "Failed to load models from {}",
            config.artifacts.dir.display()
        )
    })
}
