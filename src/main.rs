//! Swap Verification Report CLI
//!
//! Aggregates every `*_swap_log_verification.json` file in an auction data
//! directory (plus sibling `*_liquidity.json` inventories) and writes the
//! finalized summary as JSON. With `--source solutions` it reads
//! `*_solution_verification.json` files instead, taking pool kinds from the
//! liquidity files.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin verification_report -- \
//!   --auction-dir auction-data/mainnet \
//!   --output swap_log_verification_summary.json
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: No verification files found, or an I/O / configuration error

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use verification_analytics::analytics::source::{self, SourceKind};
use verification_analytics::analytics::{aggregate_sharded, AnalyticsConfig, AnalyticsSummary};

/// Aggregate swap verification files into a statistical summary
#[derive(Parser, Debug)]
#[command(name = "verification_report")]
#[command(about = "Success rates, error categories and deviation percentiles for swap verification data")]
struct Cli {
    /// Directory containing the verification files
    #[arg(short, long, env = "AUCTION_DIR", default_value = "auction-data/mainnet")]
    auction_dir: PathBuf,

    /// Verification files to read: swap-log or solutions
    #[arg(short, long, default_value = "swap-log")]
    source: SourceKind,

    /// TOML config file (otherwise ANALYTICS_* environment variables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file for the JSON summary (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worker threads for parallel ingestion (0 = one per core)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,
}

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalyticsConfig::from_toml_file(path)?,
        None => AnalyticsConfig::from_env(),
    };

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    if !cli.auction_dir.exists() {
        bail!("Directory {:?} does not exist", cli.auction_dir);
    }

    let batches = source::discover(&cli.auction_dir, cli.source)?;
    if batches.is_empty() {
        bail!("No verification files found in {:?}", cli.auction_dir);
    }
    info!(
        files = batches.len(),
        dir = ?cli.auction_dir,
        source = ?cli.source,
        "analyzing verification files"
    );

    let mut aggregator = aggregate_sharded(&batches, &config)?;
    let summary = aggregator.finalize()?;

    if summary.totals.skipped > 0 {
        warn!(skipped = summary.totals.skipped, "some records had no pool kind and were skipped");
    }

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &summary)?;
            writer.flush()?;
            info!(output = ?path, "summary written");
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &summary)?;
            writeln!(handle)?;
        }
    }

    log_headline(&summary);
    Ok(())
}

fn log_headline(summary: &AnalyticsSummary) {
    let totals = &summary.totals;
    info!(
        total = totals.total,
        success_rate = %format!("{:.1}%", totals.success_rate()),
        error_rate = %format!("{:.1}%", totals.failure_rate()),
        perfect_rate = %format!("{:.1}%", totals.perfect_rate()),
        "swap verification summary"
    );
    for rollup in summary.versions.iter().filter(|v| v.total > 0) {
        info!(
            version = %rollup.label,
            total = rollup.total,
            success_rate = %format!("{:.1}%", rollup.success_rate()),
            perfect_rate = %format!("{:.1}%", rollup.perfect_rate()),
            "version rollup"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter() {
        assert_eq!(DEFAULT_LOG_FILTER, "info");
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn test_cli_source_kind() {
        let cli = Cli::try_parse_from(["verification_report", "--auction-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.source, SourceKind::SwapLog);

        let cli = Cli::try_parse_from(["verification_report", "--source", "solutions"]).unwrap();
        assert_eq!(cli.source, SourceKind::SolutionVerification);

        assert!(Cli::try_parse_from(["verification_report", "--source", "auction"]).is_err());
    }
}
