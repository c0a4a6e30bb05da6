//! Catalog Harvest - paginated product listing harvester
//!
//! Collects product cards from a paginated catalog listing, exports them to
//! CSV and reports price statistics, IQR anomalies and the most frequent
//! words in product names.

// Module declarations
pub mod domain;
pub mod application;
pub mod infrastructure;

pub use application::{AnalysisReport, HarvestPipeline};
pub use domain::{HarvestOutcome, ProductRecord, StopReason};
