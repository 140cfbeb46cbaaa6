//! SpyFu bulk URLs main entry point
//!
//! This is the command-line interface for the bulk data-collection tool.

use clap::Parser;
use spyfu_bulk::output::OutputFormat;
use spyfu_bulk::record::ProcessType;
use spyfu_bulk::runner::{run_bulk, RunOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SpyFu (Bulk URLs) scraper CLI
///
/// Fetches competitors, keywords, ads or domain statistics for every URL in
/// an input file and exports normalized records as JSON or CSV.
#[derive(Parser, Debug)]
#[command(name = "spyfu-bulk")]
#[command(version)]
#[command(about = "SpyFu (Bulk URLs) scraper CLI", long_about = None)]
struct Cli {
    /// Path to input file containing website URLs (one per line)
    #[arg(short, long = "input", default_value = "data/input_urls.sample.txt")]
    input_file: PathBuf,

    /// Target country code (e.g. US, UK, DE)
    #[arg(short, long)]
    country: Option<String>,

    /// Type of process to run: top_competitors, most_valuable_keywords,
    /// newly_ranked_keywords, top_ads, domain_stats
    #[arg(short, long = "process")]
    process_type: String,

    /// Path where results will be written
    #[arg(short, long = "output", default_value = "data/output.json")]
    output_path: PathBuf,

    /// Output format (json or csv)
    #[arg(short = 'f', long = "format", default_value = "json")]
    output_format: String,

    /// Path to a settings file (TOML, or JSON with a .json extension)
    #[arg(long = "settings")]
    settings_path: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Reject bad selectors before any network activity
    let process_type: ProcessType = cli.process_type.parse()?;
    let output_format: OutputFormat = cli.output_format.parse()?;

    let options = RunOptions {
        input_file: cli.input_file,
        country: cli.country,
        process_type,
        output_format,
        output_path: cli.output_path,
        settings_path: cli.settings_path,
    };

    match run_bulk(&options).await {
        Ok(report) => {
            if !report.failures.is_empty() {
                tracing::warn!("Run {} finished with {} skipped URLs", report.run_id, report.failures.len());
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("spyfu_bulk=info,warn"),
            1 => EnvFilter::new("spyfu_bulk=debug,info"),
            2 => EnvFilter::new("spyfu_bulk=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
