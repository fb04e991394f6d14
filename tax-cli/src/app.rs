use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tax_core::{ImpactEngine, RegimeSet, income};
use tax_data::{batch, config};
use tracing::{debug, info};

use crate::cli::{Cli, Command, OutputFormat};
use crate::render;

/// Resolves the regime set: the file at `path` when given, otherwise the
/// built-in tables.
pub fn load_regimes(path: Option<&Path>) -> Result<Cow<'static, RegimeSet>> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading regime configuration");
            let regimes = config::load_from_file(path)
                .with_context(|| format!("Failed to load regimes from: {}", path.display()))?;
            Ok(Cow::Owned(regimes))
        }
        None => {
            let regimes = RegimeSet::builtin().context("Built-in regime tables are invalid")?;
            Ok(Cow::Borrowed(regimes))
        }
    }
}

/// Executes the parsed command, writing results to `out`.
pub fn run<W: Write>(
    cli: &Cli,
    out: &mut W,
) -> Result<()> {
    let regimes = load_regimes(cli.config.as_deref())?;
    let engine = ImpactEngine::new(&regimes);

    match &cli.command {
        Command::Impact {
            monthly_income,
            format,
        } => {
            let monthly_income = income::parse(monthly_income).context("Invalid monthly income")?;
            let result = engine
                .calculate(monthly_income)
                .with_context(|| format!("Failed to compute tax impact for {monthly_income}"))?;

            match format {
                OutputFormat::Json => render::impact_json(out, &result)?,
                OutputFormat::Text => render::impact_text(out, &result, &regimes)?,
            }
        }
        Command::Batch { input, output } => {
            let file = File::open(input)
                .with_context(|| format!("Failed to open: {}", input.display()))?;
            let records = batch::read_incomes(file)
                .with_context(|| format!("Failed to parse CSV: {}", input.display()))?;
            let rows = batch::compute(&engine, &records)
                .with_context(|| format!("Failed to compute batch: {}", input.display()))?;

            match output {
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("Failed to create: {}", path.display()))?;
                    batch::write_rows(file, &rows)?;
                    info!(rows = rows.len(), path = %path.display(), "wrote batch results");
                }
                None => batch::write_rows(&mut *out, &rows)?,
            }
        }
        Command::Regimes { format } => render::regimes(out, &regimes, *format)?,
    }

    Ok(())
}
