//! Spendwise CLI - Household spending-behavior recommender
//!
//! Usage:
//!   spendwise serve --port 3000          Start the web dashboard
//!   spendwise predict --income 50000 ... Recommend for one household
//!   spendwise batch --file homes.csv     Score a CSV of households
//!   spendwise check                      Validate the model artifacts

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config = commands::resolve_config(cli.config.as_deref(), cli.model_dir.as_deref())?;

    match cli.command {
        Commands::Serve { port, host } => {
            commands::cmd_serve(&config, host.as_deref(), port).await
        }
        Commands::Predict {
            household,
            input,
            json,
        } => {
            let input = match input {
                Some(path) => commands::read_input_file(&path)?,
                None => household.to_input(),
            };
            commands::cmd_predict(&config, &input, json)
        }
        Commands::Batch { file, output } => {
            commands::cmd_batch(&config, &file, output.as_deref())
        }
        Commands::Check => commands::cmd_check(&config),
        Commands::Schema => commands::cmd_schema(),
    }
}
