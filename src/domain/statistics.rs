//! Analysis result types shared by the stats engine, the frequency analyzer
//! and the report builder.

use serde::{Deserialize, Serialize};

use super::product::PriceSample;

/// Quartile interpolation method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuartileMethod {
    /// `m = n + 1`; the data is treated as a sample from a wider population
    #[default]
    Exclusive,
    /// `m = n - 1`; min and max are the 0th and 100th percentiles
    Inclusive,
}

/// Descriptive statistics over the valid price samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample (Bessel-corrected) standard deviation; 0 for a single sample
    pub stdev: f64,
    pub q1: f64,
    pub q3: f64,
}

impl Statistics {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Tukey fences derived from the quartiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyBounds {
    pub low: f64,
    pub high: f64,
}

/// Prices outside the Tukey fences, in sample order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalySet {
    pub low: Vec<PriceSample>,
    pub high: Vec<PriceSample>,
    /// `None` when detection was skipped for lack of samples
    pub bounds: Option<AnomalyBounds>,
}

impl AnomalySet {
    pub fn is_empty(&self) -> bool {
        self.low.is_empty() && self.high.is_empty()
    }

    pub fn total(&self) -> usize {
        self.low.len() + self.high.len()
    }
}

/// Full result of analyzing the harvested prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAnalysis {
    pub statistics: Statistics,
    pub anomalies: AnomalySet,
    /// Records whose price could not be parsed
    pub excluded_count: usize,
    /// Valid samples in harvest order, handed to the chart collaborator
    pub samples: Vec<PriceSample>,
}

impl PriceAnalysis {
    pub fn prices(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.price).collect()
    }
}

/// One row of the word-frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Most frequent content words, by descending count then first appearance
pub type FrequencyTable = Vec<WordCount>;
