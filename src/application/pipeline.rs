//! Harvest-and-analyze pipeline
//!
//! harvest → analyze → report → sinks. Every stage takes borrowed input and
//! returns owned output; nothing is shared between stages.

#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::application::frequency_analyzer::FrequencyAnalyzer;
use crate::application::harvest_controller::{HarvestConfig, HarvestController};
use crate::application::report_builder::{AnalysisReport, ReportBuilder};
use crate::application::stats_engine::StatsEngine;
use crate::domain::pagination::HarvestOutcome;
use crate::domain::statistics::FrequencyTable;
use crate::infrastructure::config::{AnalysisConfig, AppConfig, OutputConfig};
use crate::infrastructure::csv_export::export_records;
use crate::infrastructure::http_client::{HttpClient, PageFetcher};
use crate::infrastructure::parsing::{ProductListParser, RecordExtractor};
use crate::infrastructure::report_writer::{write_json_report, write_text_report};

/// What a pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub report: AnalysisReport,
    pub csv_path: PathBuf,
    pub text_report_path: PathBuf,
    pub json_report_path: Option<PathBuf>,
}

pub struct HarvestPipeline {
    controller: HarvestController,
    stats: StatsEngine,
    frequency: FrequencyAnalyzer,
    report_builder: ReportBuilder,
    output: OutputConfig,
}

impl HarvestPipeline {
    pub fn new(controller: HarvestController, analysis: &AnalysisConfig, output: OutputConfig) -> Self {
        Self {
            controller,
            stats: StatsEngine::from_config(analysis),
            frequency: FrequencyAnalyzer::new(analysis.top_words),
            report_builder: ReportBuilder::new(analysis.histogram_bins, analysis.quartile_method),
            output,
        }
    }

    /// Wire the production HTTP client and HTML parser from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher: Arc<dyn PageFetcher> =
            Arc::new(HttpClient::new(config.http.clone()).context("Failed to build HTTP client")?);
        let extractor: Arc<dyn RecordExtractor> = Arc::new(
            ProductListParser::with_config(&config.harvest.selectors)
                .context("Invalid extractor selectors")?,
        );
        let controller = HarvestController::new(
            fetcher,
            extractor,
            HarvestConfig::from_settings(&config.harvest),
        );

        Ok(Self::new(controller, &config.analysis, config.output.clone()))
    }

    /// Analyze a finished harvest into a report
    pub fn analyze(&self, harvest: &HarvestOutcome) -> AnalysisReport {
        let analysis = self.stats.analyze(&harvest.records);
        let top_words = if analysis.is_some() {
            self.frequency.top_words(&harvest.records)
        } else {
            warn!("No data to analyze: none of {} records has a numeric price", harvest.len());
            FrequencyTable::new()
        };
        self.report_builder.build(harvest, analysis.as_ref(), top_words)
    }

    /// Harvest, analyze and write every sink
    pub async fn run(&self) -> Result<PipelineSummary> {
        let harvest = self.controller.harvest().await;
        let report = self.analyze(&harvest);

        std::fs::create_dir_all(&self.output.output_dir).with_context(|| {
            format!("Failed to create output directory {}", self.output.output_dir.display())
        })?;

        let csv_path = self.output.csv_path();
        export_records(&csv_path, &harvest.records).context("Failed to export records")?;

        let text_report_path = self.output.text_report_path();
        write_text_report(&text_report_path, &report).context("Failed to write text report")?;

        let json_report_path = if self.output.write_json {
            let path = self.output.json_report_path();
            write_json_report(&path, &report).context("Failed to write JSON report")?;
            Some(path)
        } else {
            None
        };

        info!(
            "🎯 Run {} complete: {} records, {} priced",
            report.run_id, report.total_records, report.sample_count
        );

        Ok(PipelineSummary {
            report,
            csv_path,
            text_report_path,
            json_report_path,
        })
    }
}
