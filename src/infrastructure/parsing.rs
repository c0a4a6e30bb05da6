//! HTML parsing infrastructure for catalog listing pages
//!
//! The harvest loop only depends on the `RecordExtractor` trait; the
//! selector-driven `ProductListParser` is the production implementation.

pub mod config;
pub mod product_list_parser;

// Re-export public types
pub use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};
pub use config::ExtractorSelectors;
pub use product_list_parser::ProductListParser;

use crate::domain::product::ProductRecord;

/// Turns one listing page body into product records.
///
/// Returns an empty list when the page holds no products; that is how the
/// harvest recognizes the end of the catalog.
pub trait RecordExtractor: Send + Sync {
    fn extract(&self, body: &str) -> Vec<ProductRecord>;
}
