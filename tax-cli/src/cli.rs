use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::logging::LogSettings;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compares personal income tax under the 2024 PITA and the 2026 reform.
///
/// Results are written to stdout; logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "tax-impact", version, about, long_about = None)]
pub struct Cli {
    /// Regime configuration file (TOML) replacing the built-in tables.
    #[arg(long, global = true, env = "TAX_IMPACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter: a level (`debug`) or EnvFilter directive. Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append logs to this file as well as stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the tax impact for one monthly income.
    Impact {
        /// Gross monthly income, e.g. `500000` or `500,000`.
        #[arg(allow_hyphen_values = true)]
        monthly_income: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Compute the tax impact for every row of a CSV file.
    Batch {
        /// CSV with a `monthly_income` column and an optional `id` column.
        #[arg(short, long)]
        input: PathBuf,

        /// Destination CSV. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the active regime configuration.
    Regimes {
        #[arg(long, value_enum, default_value_t = RegimesFormat::Text)]
        format: RegimesFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegimesFormat {
    Text,
    Json,
    /// Same layout accepted by `--config`.
    Toml,
}

impl Cli {
    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            filter: self.log_level.clone(),
            file: self.log_file.clone(),
        }
    }
}
