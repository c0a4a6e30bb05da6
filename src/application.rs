//! Application layer module
//!
//! The harvest loop, the analysis stages and the pipeline that composes
//! them.

pub mod frequency_analyzer;
pub mod harvest_controller;
pub mod pipeline;
pub mod report_builder;
pub mod stats_engine;

pub use frequency_analyzer::FrequencyAnalyzer;
pub use harvest_controller::{HarvestConfig, HarvestController};
pub use pipeline::{HarvestPipeline, PipelineSummary};
pub use report_builder::{AnalysisReport, PriceSummary, ReportBuilder};
pub use stats_engine::StatsEngine;
