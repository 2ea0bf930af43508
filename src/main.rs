//! nasfind - Search text across a NASTRAN deck and its INCLUDE tree
//!
//! nasfind provides:
//! - INCLUDE resolution with cycle and duplicate safety
//! - Case-insensitive line search grouped per file
//! - A scrollable result screen with NASTRAN syntax colouring
//! - Structured output (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod core;
mod engine;
mod history;
mod view;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "NASFIND_LOG";

fn init_logging(cli: &cli::Cli) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = if cli.quiet {
            "off"
        } else if cli.verbose {
            "debug"
        } else {
            "error"
        };
        EnvFilter::new(level)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(&cli);
    cli::run(cli)
}
