use std::io;

use anyhow::Result;
use clap::Parser;
use tax_cli::{Cli, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_settings())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    tax_cli::run(&cli, &mut out)
}
