//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use spendwise_core::{InputField, RawFinancialInput};

/// Spendwise - See how you spend and what to do about it
#[derive(Parser)]
#[command(name = "spendwise")]
#[command(about = "Household spending-behavior recommender", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: ~/.local/share/spendwise/config/spendwise.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing the model artifacts
    ///
    /// Overrides both the config file and SPENDWISE_MODEL_DIR.
    #[arg(long, global = true)]
    pub model_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the models and start the web dashboard
    Serve {
        /// Port to listen on (default from config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default from config)
        #[arg(long)]
        host: Option<String>,
    },

    /// Recommend for one household
    Predict {
        #[command(flatten)]
        household: HouseholdArgs,

        /// Read the household from a JSON object keyed by column name
        ///
        /// When given, the individual field flags are ignored.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the full recommendation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score every household in a CSV file
    Batch {
        /// CSV file whose header uses the column names (Income, Rent, ...)
        #[arg(short, long)]
        file: PathBuf,

        /// Write results here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load and validate the model artifacts
    Check,

    /// Print the feature columns the preprocessor expects
    Schema,
}

/// Monthly figures for one household (all default to 0)
#[derive(Args, Debug, Clone, Default)]
pub struct HouseholdArgs {
    #[arg(long, default_value_t = 0)]
    pub income: u64,
    #[arg(long, default_value_t = 0)]
    pub age: u64,
    #[arg(long, default_value_t = 0)]
    pub dependents: u64,
    #[arg(long, default_value_t = 0)]
    pub rent: u64,
    #[arg(long, default_value_t = 0)]
    pub loan_repayment: u64,
    #[arg(long, default_value_t = 0)]
    pub insurance: u64,
    #[arg(long, default_value_t = 0)]
    pub groceries: u64,
    #[arg(long, default_value_t = 0)]
    pub transport: u64,
    #[arg(long, default_value_t = 0)]
    pub eating_out: u64,
    #[arg(long, default_value_t = 0)]
    pub entertainment: u64,
    #[arg(long, default_value_t = 0)]
    pub utilities: u64,
    #[arg(long, default_value_t = 0)]
    pub healthcare: u64,
    #[arg(long, default_value_t = 0)]
    pub education: u64,
    #[arg(long, default_value_t = 0)]
    pub miscellaneous: u64,
}

impl HouseholdArgs {
    pub fn to_input(&self) -> RawFinancialInput {
        RawFinancialInput::default()
            .with(InputField::Income, self.income)
            .with(InputField::Age, self.age)
            .with(InputField::Dependents, self.dependents)
            .with(InputField::Rent, self.rent)
            .with(InputField::LoanRepayment, self.loan_repayment)
            .with(InputField::Insurance, self.insurance)
            .with(InputField::Groceries, self.groceries)
            .with(InputField::Transport, self.transport)
            .with(InputField::EatingOut, self.eating_out)
            .with(InputField::Entertainment, self.entertainment)
            .with(InputField::Utilities, self.utilities)
            .with(InputField::Healthcare, self.healthcare)
            .with(InputField::Education, self.education)
            .with(InputField::Miscellaneous, self.miscellaneous)
    }
}
