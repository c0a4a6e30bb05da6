//! Text and JSON report sinks
//!
//! The text rendering includes an ASCII histogram of the prices with the
//! bins holding the mean and the median marked.

#![allow(clippy::uninlined_format_args)]

use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::application::report_builder::{AnalysisReport, PriceSummary};
use crate::domain::histogram::HistogramData;
use crate::domain::product::PriceSample;
use crate::infrastructure::export_error::{ExportError, ExportResult};

const BAR_WIDTH: usize = 40;

/// Render the report as human-readable text
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Catalog price analysis ===");
    let _ = writeln!(out, "Run: {}", report.run_id);
    let _ = writeln!(out, "Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "Stopped: {}", report.stop_reason);
    let _ = writeln!(out, "Pages visited: {}", report.pages_visited);
    if !report.failed_pages.is_empty() {
        let pages: Vec<String> = report.failed_pages.iter().map(u32::to_string).collect();
        let _ = writeln!(out, "Skipped pages: {}", pages.join(", "));
    }
    let _ = writeln!(out, "Records: {}", report.total_records);
    let _ = writeln!(
        out,
        "Valid prices: {} ({} excluded)",
        report.sample_count, report.excluded_count
    );
    if report.price_on_request_count > 0 {
        let _ = writeln!(out, "Price on request: {}", report.price_on_request_count);
    }
    out.push('\n');

    match &report.prices {
        Some(prices) => render_prices(&mut out, prices),
        None => {
            let _ = writeln!(out, "No data to analyze: no record has a numeric price.");
        }
    }

    if !report.top_words.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Top words in product names:");
        for (rank, entry) in report.top_words.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {} ({})", rank + 1, entry.word, entry.count);
        }
    }

    if let Some(histogram) = &report.histogram {
        out.push('\n');
        render_histogram(&mut out, histogram);
    }

    out
}

fn render_prices(out: &mut String, prices: &PriceSummary) {
    let _ = writeln!(out, "Price range: {:.2} - {:.2}", prices.min, prices.max);
    let _ = writeln!(out, "Mean: {:.2}", prices.mean);
    let _ = writeln!(out, "Median: {:.2}", prices.median);
    let _ = writeln!(out, "Std deviation: {:.2}", prices.stdev);
    let _ = writeln!(
        out,
        "Q1: {:.2}  Q3: {:.2}  IQR: {:.2} ({:?} quartiles)",
        prices.q1, prices.q3, prices.iqr, prices.quartile_method
    );

    match prices.bounds {
        Some(bounds) => {
            let _ = writeln!(
                out,
                "Anomaly bounds: below {:.2} or above {:.2}",
                bounds.low, bounds.high
            );
            render_anomalies(out, "Low", prices.low_anomaly_count, &prices.low_examples);
            render_anomalies(out, "High", prices.high_anomaly_count, &prices.high_examples);
        }
        None => {
            let _ = writeln!(out, "Anomaly detection skipped: fewer than 4 prices.");
        }
    }
}

fn render_anomalies(out: &mut String, side: &str, count: usize, examples: &[PriceSample]) {
    let _ = writeln!(out, "{} anomalies: {}", side, count);
    for example in examples {
        let _ = writeln!(out, "  - {} : {:.2}", example.name, example.price);
    }
}

fn render_histogram(out: &mut String, histogram: &HistogramData) {
    let _ = writeln!(out, "Price distribution:");
    let tallest = histogram.tallest().max(1);

    for bin in &histogram.bins {
        let bar_len = (bin.count * BAR_WIDTH).div_ceil(tallest);
        let mut markers = Vec::new();
        if contains(bin.lower, bin.upper, histogram.mean) {
            markers.push("mean");
        }
        if contains(bin.lower, bin.upper, histogram.median) {
            markers.push("median");
        }
        let suffix = if markers.is_empty() {
            String::new()
        } else {
            format!("  <- {}", markers.join(", "))
        };
        let _ = writeln!(
            out,
            "{:>12.2} - {:>12.2} | {:<width$} {}{}",
            bin.lower,
            bin.upper,
            "#".repeat(bar_len),
            bin.count,
            suffix,
            width = BAR_WIDTH
        );
    }
}

fn contains(lower: f64, upper: f64, value: f64) -> bool {
    value >= lower && value <= upper
}

pub fn write_text_report(path: &Path, report: &AnalysisReport) -> ExportResult<()> {
    std::fs::write(path, render_text(report)).map_err(|e| ExportError::io(path, e))?;
    info!("📝 Text report written to {}", path.display());
    Ok(())
}

pub fn write_json_report(path: &Path, report: &AnalysisReport) -> ExportResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|e| ExportError::io(path, e))?;
    info!("📝 JSON report written to {}", path.display());
    Ok(())
}
