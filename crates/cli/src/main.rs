use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sales_analytics::{AnalyzeOptions, SalesAggregator};
use sales_core::ReportConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Rank sellers by profit and print the bonus report as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dataset file with `sellers`, `products` and `purchase_records` arrays.
    #[arg(long)]
    data: PathBuf,

    /// Optional report configuration (JSON). Missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of top products listed per seller.
    #[arg(long)]
    top_products: Option<usize>,

    /// Print the report on a single line.
    #[arg(long)]
    compact: bool,

    /// Log filter, e.g. "info" or "sales_analytics=debug". Defaults to RUST_LOG, then "info".
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            ReportConfig::from_json(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ReportConfig::default(),
    };
    if let Some(limit) = cli.top_products {
        config.top_products_limit = limit;
        config.validate().context("invalid --top-products")?;
    }

    let data = sales_ingestion::load_dataset(&cli.data)
        .with_context(|| format!("failed to load dataset {}", cli.data.display()))?;

    let options = AnalyzeOptions::from_config(&config);
    let aggregator = SalesAggregator::new(config);
    let analysis = aggregator.run(&data, &options).context("sales analysis failed")?;

    if analysis.skips.records_skipped > 0 || analysis.skips.items_skipped > 0 {
        info!(
            records_skipped = analysis.skips.records_skipped,
            items_skipped = analysis.skips.items_skipped,
            "some purchase data referenced unknown sellers or products"
        );
    }

    let rendered = if cli.compact {
        serde_json::to_string(&analysis.entries)?
    } else {
        serde_json::to_string_pretty(&analysis.entries)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
