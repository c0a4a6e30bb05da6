//! Histogram data handed to the chart collaborator.
//!
//! Equal-width bins over the valid prices plus the mean and median reference
//! lines. Rendering is left to the sink.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramData {
    pub bins: Vec<HistogramBin>,
    pub mean: f64,
    pub median: f64,
}

impl HistogramData {
    /// Bin `prices` into `bin_count` equal-width bins.
    ///
    /// Every bin is half-open except the last, which also holds the maximum.
    /// A degenerate range (all prices equal) collapses to a single bin.
    /// Returns `None` when there is nothing to bin.
    pub fn from_prices(prices: &[f64], bin_count: usize, mean: f64, median: f64) -> Option<Self> {
        if prices.is_empty() || bin_count == 0 {
            return None;
        }

        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if (max - min).abs() < f64::EPSILON {
            return Some(Self {
                bins: vec![HistogramBin { lower: min, upper: max, count: prices.len() }],
                mean,
                median,
            });
        }

        let width = (max - min) / bin_count as f64;
        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bin_count { max } else { min + width * (i + 1) as f64 },
                count: 0,
            })
            .collect();

        for &price in prices {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let index = (((price - min) / width).floor() as usize).min(bin_count - 1);
            bins[index].count += 1;
        }

        Some(Self { bins, mean, median })
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    pub fn tallest(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_every_price() {
        let prices = [100.0, 200.0, 300.0, 400.0, 10_000.0];
        let histogram = HistogramData::from_prices(&prices, 4, 2200.0, 300.0).unwrap();
        assert_eq!(histogram.bins.len(), 4);
        assert_eq!(histogram.total(), prices.len());
        assert_eq!(histogram.bins[0].count, 4);
        assert_eq!(histogram.bins[3].count, 1);
        assert_eq!(histogram.bins[3].upper, 10_000.0);
    }

    #[test]
    fn equal_prices_collapse_to_one_bin() {
        let histogram = HistogramData::from_prices(&[5.0, 5.0, 5.0], 10, 5.0, 5.0).unwrap();
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.tallest(), 3);
    }

    #[test]
    fn nothing_to_bin() {
        assert!(HistogramData::from_prices(&[], 10, 0.0, 0.0).is_none());
        assert!(HistogramData::from_prices(&[1.0], 0, 1.0, 1.0).is_none());
    }
}
