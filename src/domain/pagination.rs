//! Pagination domain logic.
//!
//! Responsibility:
//! - list page URL construction (`{base}&p={page}`)
//! - harvest termination reasons and the harvest result

use serde::{Deserialize, Serialize};

use super::constants::site::PAGE_QUERY_PARAM;
use super::product::ProductRecord;

/// Build the URL of one catalog listing page.
///
/// The page parameter is appended to the existing query string; a base URL
/// without a query gets one.
pub fn page_url(base_url: &str, page: u32) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", base_url, separator, PAGE_QUERY_PARAM, page)
}

/// Why a harvest stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The item cap was reached
    CapReached,
    /// A page was fetched successfully but contained no products
    CatalogExhausted,
    /// The page request budget (`max_pages`) was exhausted
    PageLimitReached,
    /// Too many pages failed in a row
    TooManyFailures,
}

impl StopReason {
    pub fn describe(self) -> &'static str {
        match self {
            Self::CapReached => "item cap reached",
            Self::CatalogExhausted => "catalog exhausted",
            Self::PageLimitReached => "page limit reached",
            Self::TooManyFailures => "too many consecutive page failures",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Result of one harvest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestOutcome {
    /// Records in harvest order (page order, then in-page order)
    pub records: Vec<ProductRecord>,
    pub stop_reason: StopReason,
    /// Page indices that were requested at least once
    pub pages_visited: u32,
    /// Page indices skipped after every attempt failed
    pub failed_pages: Vec<u32>,
}

impl HarvestOutcome {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
