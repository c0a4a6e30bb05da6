#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use catalog_harvest_lib::application::HarvestPipeline;
use catalog_harvest_lib::domain::QuartileMethod;
use catalog_harvest_lib::infrastructure::config::AppConfig;
use catalog_harvest_lib::infrastructure::logging::{init_logging_with_config, log_system_info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QuartileArg {
    Exclusive,
    Inclusive,
}

impl From<QuartileArg> for QuartileMethod {
    fn from(arg: QuartileArg) -> Self {
        match arg {
            QuartileArg::Exclusive => Self::Exclusive,
            QuartileArg::Inclusive => Self::Inclusive,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "catalog-harvest",
    version,
    about = "Harvest a paginated product catalog and report price statistics"
)]
struct Cli {
    /// Catalog listing URL; the page parameter is appended to it
    #[arg(value_name = "BASE_URL")]
    base_url: Option<String>,

    /// Maximum number of products to collect
    #[arg(value_name = "MAX_ITEMS")]
    max_items: Option<usize>,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for products.csv and the reports
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Stop after this many page requests
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Attempts per page before it is skipped
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Delay between page requests
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Quartile method used for anomaly fences
    #[arg(long, value_enum)]
    quartiles: Option<QuartileArg>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    /// Command-line values take precedence over file and environment
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.harvest.base_url.clone_from(base_url);
        }
        if let Some(max_items) = self.max_items {
            config.harvest.max_items = max_items;
        }
        if let Some(output_dir) = &self.output_dir {
            config.output.output_dir.clone_from(output_dir);
        }
        if let Some(max_pages) = self.max_pages {
            config.harvest.max_pages = Some(max_pages);
        }
        if let Some(retries) = self.retries {
            config.harvest.retry.max_attempts = retries;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.harvest.pacing_ms = delay_ms;
        }
        if let Some(quartiles) = self.quartiles {
            config.analysis.quartile_method = quartiles.into();
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid command-line arguments")?;

    init_logging_with_config(config.logging.clone())?;
    log_system_info();
    info!("⚙️ Configuration loaded (source: {})", AppConfig::source_label(cli.config.as_deref()));

    let pipeline = HarvestPipeline::from_config(&config)?;
    let summary = pipeline.run().await?;

    info!("Products: {}", summary.csv_path.display());
    info!("Report: {}", summary.text_report_path.display());
    if let Some(json) = &summary.json_report_path {
        info!("JSON report: {}", json.display());
    }
    if summary.report.has_no_data() {
        info!("No data to analyze");
    }

    Ok(())
}
