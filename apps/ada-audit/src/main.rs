//! ADA audit binary
//!
//! Analyzes scan files in parallel and prints one JSON report to stdout.
//! Logs go to stderr.

use ada_audit::runner::run_batch;
use ada_audit::scan_file::load_scan;
use anyhow::Context;
use clap::Parser;
use compliance_engine::{Analyzer, AnalyzerConfig};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ada-audit")]
#[command(
    version,
    about = "ADA compliance evaluation and remediation estimates for infrastructure scans"
)]
struct Args {
    /// Scan files (JSON detections + measurements)
    #[arg(required = true)]
    scans: Vec<PathBuf>,

    /// Analyzer configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site complexity: standard, urban_high_traffic, historic_district,
    /// utility_conflicts or drainage_issues
    #[arg(long)]
    complexity: Option<String>,

    /// Budget per remediation phase; enables phased planning
    #[arg(long)]
    budget: Option<u64>,

    /// Drop detections below this confidence
    #[arg(long)]
    confidence_threshold: Option<f64>,

    /// Abandon scans still running after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn analyzer_config(&self) -> anyhow::Result<AnalyzerConfig> {
        let mut config = match &self.config {
            Some(path) => AnalyzerConfig::from_file(path)?,
            None => AnalyzerConfig::default(),
        };

        if let Some(complexity) = &self.complexity {
            config.complexity = complexity.clone();
        }
        if let Some(budget) = self.budget {
            config.budget = Some(budget);
        }
        if let Some(threshold) = self.confidence_threshold {
            config.confidence_threshold = threshold;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // stdout carries the report only
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting ada-audit v{}", env!("CARGO_PKG_VERSION"));

    let config = args.analyzer_config()?;
    let analyzer = Analyzer::with_config(config).context("Invalid analyzer configuration")?;
    tracing::info!(
        "Catalog: {} ({} rules), complexity: {}",
        analyzer.catalog().name,
        analyzer.catalog().len(),
        analyzer.config().complexity
    );

    let mut scans = Vec::with_capacity(args.scans.len());
    let mut unreadable = 0usize;
    for path in &args.scans {
        match load_scan(path) {
            Ok(scan) => scans.push(scan),
            Err(e) => {
                tracing::error!("{:#}", e);
                unreadable += 1;
            }
        }
    }

    let timeout = args.timeout_ms.map(Duration::from_millis);
    let report = run_batch(Arc::new(analyzer), scans, timeout).await;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    // Dropping the runtime would block on abandoned scans
    if report.has_abandoned_scans() {
        std::io::stdout().flush()?;
        std::process::exit(1);
    }

    if report.is_clean() && unreadable == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
