//! Price statistics and IQR anomaly detection
//!
//! Pure computation over harvested records: descriptive statistics, quartiles
//! (exclusive method by default, matching Python's
//! `statistics.quantiles(data, n=4)`) and Tukey-fence outliers.

#![allow(clippy::uninlined_format_args)]

use tracing::debug;

use crate::domain::constants::analysis::{DEFAULT_IQR_MULTIPLIER, MIN_SAMPLES_FOR_QUARTILES};
use crate::domain::product::{PriceSample, ProductRecord};
use crate::domain::statistics::{AnomalyBounds, AnomalySet, PriceAnalysis, QuartileMethod, Statistics};
use crate::infrastructure::config::AnalysisConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsEngine {
    quartile_method: QuartileMethod,
    iqr_multiplier: f64,
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::new(QuartileMethod::Exclusive, DEFAULT_IQR_MULTIPLIER)
    }
}

impl StatsEngine {
    pub fn new(quartile_method: QuartileMethod, iqr_multiplier: f64) -> Self {
        Self {
            quartile_method,
            iqr_multiplier,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.quartile_method, config.iqr_multiplier)
    }

    /// Analyze the prices of `records`.
    ///
    /// Records whose price does not parse as a finite number are excluded and
    /// counted. Returns `None` when no valid price remains.
    pub fn analyze(&self, records: &[ProductRecord]) -> Option<PriceAnalysis> {
        let samples: Vec<PriceSample> = records.iter().filter_map(PriceSample::from_record).collect();
        let excluded_count = records.len() - samples.len();
        debug!(
            "📊 {} valid prices, {} excluded from statistics",
            samples.len(),
            excluded_count
        );

        let prices: Vec<f64> = samples.iter().map(|sample| sample.price).collect();
        let statistics = self.describe(&prices)?;
        let anomalies = self.detect_anomalies(&samples, &statistics);

        Some(PriceAnalysis {
            statistics,
            anomalies,
            excluded_count,
            samples,
        })
    }

    /// Descriptive statistics over finite prices; `None` for an empty slice
    pub fn describe(&self, prices: &[f64]) -> Option<Statistics> {
        if prices.is_empty() {
            return None;
        }

        let mut sorted = prices.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let stdev = if count > 1 {
            let squared: f64 = sorted.iter().map(|price| (price - mean).powi(2)).sum();
            (squared / (count - 1) as f64).sqrt()
        } else {
            0.0
        };
        let (q1, q3) = quartiles(&sorted, self.quartile_method);

        Some(Statistics {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            median: median(&sorted),
            stdev,
            q1,
            q3,
        })
    }

    /// Classify samples against the Tukey fences.
    ///
    /// A price strictly below the lower fence is low, strictly above the
    /// upper fence is high. Detection is skipped below four samples.
    pub fn detect_anomalies(&self, samples: &[PriceSample], statistics: &Statistics) -> AnomalySet {
        if statistics.count < MIN_SAMPLES_FOR_QUARTILES {
            return AnomalySet::default();
        }

        let iqr = statistics.iqr();
        let bounds = AnomalyBounds {
            low: statistics.q1 - self.iqr_multiplier * iqr,
            high: statistics.q3 + self.iqr_multiplier * iqr,
        };

        let mut anomalies = AnomalySet {
            bounds: Some(bounds),
            ..AnomalySet::default()
        };
        for sample in samples {
            if sample.price < bounds.low {
                anomalies.low.push(sample.clone());
            } else if sample.price > bounds.high {
                anomalies.high.push(sample.clone());
            }
        }

        debug!(
            "Anomaly fences [{:.2}, {:.2}]: {} low, {} high",
            bounds.low,
            bounds.high,
            anomalies.low.len(),
            anomalies.high.len()
        );
        anomalies
    }
}

/// Median of an ascending, non-empty slice
fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// First and third quartiles of an ascending, non-empty slice.
///
/// Below four samples the quartiles degrade to `(min, max)`.
pub fn quartiles(sorted: &[f64], method: QuartileMethod) -> (f64, f64) {
    let n = sorted.len();
    if n < MIN_SAMPLES_FOR_QUARTILES {
        return (sorted[0], sorted[n - 1]);
    }
    (
        quartile(sorted, 1, method),
        quartile(sorted, 3, method),
    )
}

/// The `i`-th 4-quantile, interpolated between neighbouring order statistics
/// in integer steps of a quarter.
fn quartile(sorted: &[f64], i: usize, method: QuartileMethod) -> f64 {
    let n = sorted.len();
    match method {
        QuartileMethod::Exclusive => {
            let m = n + 1;
            let j = i * m / 4;
            let delta = i * m - j * 4;
            (sorted[j - 1] * (4 - delta) as f64 + sorted[j] * delta as f64) / 4.0
        }
        QuartileMethod::Inclusive => {
            let m = n - 1;
            let j = i * m / 4;
            let delta = i * m - j * 4;
            let upper = sorted.get(j + 1).copied().unwrap_or(sorted[j]);
            (sorted[j] * (4 - delta) as f64 + upper * delta as f64) / 4.0
        }
    }
}
