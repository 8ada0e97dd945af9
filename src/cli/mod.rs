//! CLI implementation using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Memory snapshot analysis and diagnostic reports.
#[derive(Parser)]
#[command(name = "snaplens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a plain-text analysis of a snapshot to stdout
    Summary(SummaryArgs),

    /// Generate a standalone HTML report from a snapshot
    #[command(alias = "html")]
    Report(ReportArgs),
}

#[derive(Args)]
pub struct SummaryArgs {
    /// Path to the snapshot JSON file
    pub snapshot: PathBuf,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Path to the snapshot JSON file
    pub snapshot: PathBuf,

    /// Output HTML file path
    #[arg(short, long, default_value = "snapshot-report.html")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary() {
        let cli = Cli::try_parse_from(["snaplens", "summary", "dump.json"]).unwrap();
        match cli.command {
            Command::Summary(args) => assert_eq!(args.snapshot, PathBuf::from("dump.json")),
            _ => panic!("expected summary"),
        }
    }

    #[test]
    fn test_report_default_output() {
        let cli = Cli::try_parse_from(["snaplens", "report", "dump.json"]).unwrap();
        match cli.command {
            Command::Report(args) => {
                assert_eq!(args.output, PathBuf::from("snapshot-report.html"));
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_html_alias() {
        let cli = Cli::try_parse_from(["snaplens", "html", "dump.json", "-o", "out.html"]).unwrap();
        assert!(matches!(cli.command, Command::Report(_)));
    }

    #[test]
    fn test_missing_snapshot_argument() {
        assert!(Cli::try_parse_from(["snaplens", "summary"]).is_err());
    }
}
