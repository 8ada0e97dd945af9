//! snaplens CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use snaplens::cli::{Cli, Command};
use snaplens::config::Config;
use snaplens::core::Result;
use snaplens::report;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("snaplens=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(std::env::current_dir()?)?,
    };

    match cli.command {
        Command::Summary(args) => {
            report::write_summary(&args.snapshot, &config, |line| println!("{line}"))?;
        }
        Command::Report(args) => {
            let page = report::generate_html(&args.snapshot, &config)?;
            report::write_html_file(&page, &args.output)?;
            println!("Report written to {}", args.output.display());
        }
    }
    Ok(())
}
