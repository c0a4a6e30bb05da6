//! Analysis report assembly
//!
//! Combines the harvest outcome, price analysis and word frequencies into one
//! serializable payload consumed by the text and JSON sinks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::constants::analysis::{ANOMALY_EXAMPLES_PER_SIDE, DEFAULT_HISTOGRAM_BINS};
use crate::domain::histogram::HistogramData;
use crate::domain::pagination::{HarvestOutcome, StopReason};
use crate::domain::product::PriceSample;
use crate::domain::statistics::{AnomalyBounds, FrequencyTable, PriceAnalysis, QuartileMethod};

/// Price section of the report; absent when no price could be parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub stdev: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub quartile_method: QuartileMethod,
    pub bounds: Option<AnomalyBounds>,
    pub low_anomaly_count: usize,
    pub high_anomaly_count: usize,
    pub low_examples: Vec<PriceSample>,
    pub high_examples: Vec<PriceSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub stop_reason: StopReason,
    pub pages_visited: u32,
    pub failed_pages: Vec<u32>,
    pub total_records: usize,
    pub sample_count: usize,
    pub excluded_count: usize,
    /// Records listed with the "price on request" placeholder
    pub price_on_request_count: usize,
    pub prices: Option<PriceSummary>,
    pub top_words: FrequencyTable,
    pub histogram: Option<HistogramData>,
}

impl AnalysisReport {
    /// Whether there was nothing to analyze
    pub fn has_no_data(&self) -> bool {
        self.prices.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportBuilder {
    examples_per_side: usize,
    histogram_bins: usize,
    quartile_method: QuartileMethod,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_HISTOGRAM_BINS, QuartileMethod::default())
    }
}

impl ReportBuilder {
    pub const fn new(histogram_bins: usize, quartile_method: QuartileMethod) -> Self {
        Self {
            examples_per_side: ANOMALY_EXAMPLES_PER_SIDE,
            histogram_bins,
            quartile_method,
        }
    }

    pub fn build(
        &self,
        harvest: &HarvestOutcome,
        analysis: Option<&PriceAnalysis>,
        top_words: FrequencyTable,
    ) -> AnalysisReport {
        let total_records = harvest.len();
        let sample_count = analysis.map_or(0, |a| a.statistics.count);

        let prices = analysis.map(|a| {
            let stats = &a.statistics;
            PriceSummary {
                min: stats.min,
                max: stats.max,
                mean: stats.mean,
                median: stats.median,
                stdev: stats.stdev,
                q1: stats.q1,
                q3: stats.q3,
                iqr: stats.iqr(),
                quartile_method: self.quartile_method,
                bounds: a.anomalies.bounds,
                low_anomaly_count: a.anomalies.low.len(),
                high_anomaly_count: a.anomalies.high.len(),
                low_examples: a.anomalies.low.iter().take(self.examples_per_side).cloned().collect(),
                high_examples: a.anomalies.high.iter().take(self.examples_per_side).cloned().collect(),
            }
        });

        let histogram = analysis.and_then(|a| {
            HistogramData::from_prices(
                &a.prices(),
                self.histogram_bins,
                a.statistics.mean,
                a.statistics.median,
            )
        });

        AnalysisReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            stop_reason: harvest.stop_reason,
            pages_visited: harvest.pages_visited,
            failed_pages: harvest.failed_pages.clone(),
            total_records,
            sample_count,
            excluded_count: total_records - sample_count,
            price_on_request_count: harvest
                .records
                .iter()
                .filter(|record| record.is_price_on_request())
                .count(),
            prices,
            // no frequency report without priced records
            top_words: if analysis.is_some() { top_words } else { FrequencyTable::new() },
            histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::frequency_analyzer::FrequencyAnalyzer;
    use crate::application::stats_engine::StatsEngine;
    use crate::domain::product::ProductRecord;

    fn outcome(prices: &[&str]) -> HarvestOutcome {
        HarvestOutcome {
            records: prices
                .iter()
                .enumerate()
                .map(|(i, price)| ProductRecord::new(i.to_string(), format!("лист {}", i), "#", *price))
                .collect(),
            stop_reason: StopReason::CatalogExhausted,
            pages_visited: 2,
            failed_pages: vec![],
        }
    }

    #[test]
    fn report_caps_anomaly_examples() {
        let mut prices = vec!["100"; 20];
        prices.extend(["9000", "9100", "9200", "9300", "9400"]);
        let harvest = outcome(&prices);
        let analysis = StatsEngine::default().analyze(&harvest.records);
        let words = FrequencyAnalyzer::default().top_words(&harvest.records);

        let report = ReportBuilder::default().build(&harvest, analysis.as_ref(), words);
        let summary = report.prices.as_ref().unwrap();

        assert_eq!(report.total_records, 25);
        assert_eq!(report.sample_count, 25);
        assert_eq!(report.excluded_count, 0);
        assert_eq!(summary.high_anomaly_count, 5);
        assert_eq!(summary.high_examples.len(), 3);
        assert_eq!(summary.high_examples[0].price, 9000.0);
        assert_eq!(report.top_words[0].word, "лист");
        assert_eq!(report.histogram.as_ref().unwrap().total(), 25);
    }

    #[test]
    fn report_without_prices_is_no_data() {
        let harvest = outcome(&["По запросу", "По запросу"]);
        let analysis = StatsEngine::default().analyze(&harvest.records);

        let words = FrequencyAnalyzer::default().top_words(&harvest.records);

        let report = ReportBuilder::default().build(&harvest, analysis.as_ref(), words);

        assert!(report.has_no_data());
        assert!(report.top_words.is_empty());
        assert!(report.histogram.is_none());
        assert_eq!(report.total_records, 2);
        assert_eq!(report.excluded_count, 2);
        assert_eq!(report.price_on_request_count, 2);
        assert_eq!(report.stop_reason, StopReason::CatalogExhausted);
    }

    #[test]
    fn report_serializes_to_json() {
        let harvest = outcome(&["100", "200"]);
        let analysis = StatsEngine::default().analyze(&harvest.records);
        let report = ReportBuilder::default().build(&harvest, analysis.as_ref(), Vec::new());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stop_reason"], "catalog_exhausted");
        assert_eq!(json["prices"]["quartile_method"], "exclusive");
        assert_eq!(json["prices"]["mean"], 150.0);
    }
}
