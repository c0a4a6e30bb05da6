//! Domain module - Core business entities and value types
//!
//! Records harvested from the catalog, pagination rules, and the result
//! types of the price and naming analysis.
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod constants;
pub mod histogram;
pub mod pagination;
pub mod product;
pub mod statistics;

// Re-export commonly used items for convenience
pub use histogram::{HistogramBin, HistogramData};
pub use pagination::{HarvestOutcome, StopReason, page_url};
pub use product::{PriceSample, ProductRecord};
pub use statistics::{
    AnomalyBounds, AnomalySet, FrequencyTable, PriceAnalysis, QuartileMethod, Statistics, WordCount,
};
