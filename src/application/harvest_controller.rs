//! Pagination-driven harvest loop
//!
//! Requests listing pages one at a time, accumulates extracted records and
//! stops on the item cap, on the first successful page without products, or
//! on one of the optional page/failure limits. Failed pages are retried per
//! the injected `RetryPolicy` and then skipped.

#![allow(clippy::uninlined_format_args)]

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::constants::{harvest, site};
use crate::domain::pagination::{HarvestOutcome, StopReason, page_url};
use crate::infrastructure::config::HarvestSettings;
use crate::infrastructure::http_client::{FetchOutcome, PageFetcher};
use crate::infrastructure::parsing::RecordExtractor;
use crate::infrastructure::retry_calculator::RetryPolicy;

/// Harvest loop parameters
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestConfig {
    pub base_url: String,
    pub max_items: usize,
    pub start_page: u32,
    /// Delay between consecutive page requests
    pub pacing: Duration,
    /// Maximum number of page requests (retries of one page count once)
    pub max_pages: Option<u32>,
    pub max_consecutive_failures: Option<u32>,
    pub retry: RetryPolicy,
}

impl HarvestConfig {
    pub fn new(base_url: impl Into<String>, max_items: usize) -> Self {
        Self {
            base_url: base_url.into(),
            max_items,
            start_page: site::PAGE_NUMBERING_BASE,
            pacing: Duration::from_millis(harvest::DEFAULT_PACING_MS),
            max_pages: None,
            max_consecutive_failures: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_settings(settings: &HarvestSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            max_items: settings.max_items,
            start_page: settings.start_page,
            pacing: Duration::from_millis(settings.pacing_ms),
            max_pages: settings.max_pages,
            max_consecutive_failures: settings.max_consecutive_failures,
            retry: settings.retry.clone(),
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn with_max_consecutive_failures(mut self, limit: u32) -> Self {
        self.max_consecutive_failures = Some(limit);
        self
    }
}

pub struct HarvestController {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn RecordExtractor>,
    config: HarvestConfig,
}

impl HarvestController {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn RecordExtractor>,
        config: HarvestConfig,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            config,
        }
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Run the harvest to completion.
    ///
    /// The result never holds more than `max_items` records. Page failures
    /// are logged and skipped, never returned as errors.
    pub async fn harvest(&self) -> HarvestOutcome {
        let config = &self.config;
        let mut records = Vec::new();
        let mut failed_pages = Vec::new();
        let mut pages_visited = 0u32;
        let mut consecutive_failures = 0u32;
        let mut page = config.start_page;

        info!(
            "🚀 Starting harvest: {} (cap {} items)",
            config.base_url, config.max_items
        );

        let stop_reason = loop {
            if records.len() >= config.max_items {
                break StopReason::CapReached;
            }
            if config.max_pages.is_some_and(|max| pages_visited >= max) {
                break StopReason::PageLimitReached;
            }

            let url = page_url(&config.base_url, page);
            pages_visited += 1;

            match self.fetch_with_retry(&url, page).await {
                Some(body) => {
                    consecutive_failures = 0;
                    let page_records = self.extractor.extract(&body);
                    if page_records.is_empty() {
                        info!("Page {}: no products found, catalog exhausted", page);
                        break StopReason::CatalogExhausted;
                    }

                    let remaining = config.max_items - records.len();
                    let found = page_records.len();
                    records.extend(page_records.into_iter().take(remaining));
                    info!(
                        "📄 Page {}: {} products ({} collected)",
                        page,
                        found,
                        records.len()
                    );

                    if records.len() >= config.max_items {
                        break StopReason::CapReached;
                    }
                }
                None => {
                    failed_pages.push(page);
                    consecutive_failures += 1;
                    if config
                        .max_consecutive_failures
                        .is_some_and(|limit| consecutive_failures >= limit)
                    {
                        warn!(
                            "🛑 {} consecutive pages failed, giving up",
                            consecutive_failures
                        );
                        break StopReason::TooManyFailures;
                    }
                }
            }

            page += 1;
            if !config.pacing.is_zero() {
                tokio::time::sleep(config.pacing).await;
            }
        };

        info!(
            "✅ Harvest finished: {} records from {} pages ({})",
            records.len(),
            pages_visited,
            stop_reason
        );
        if !failed_pages.is_empty() {
            warn!("Skipped pages: {:?}", failed_pages);
        }

        HarvestOutcome {
            records,
            stop_reason,
            pages_visited,
            failed_pages,
        }
    }

    /// Fetch one page, retrying per policy. `None` means the page is skipped.
    async fn fetch_with_retry(&self, url: &str, page: u32) -> Option<String> {
        let retry = &self.config.retry;
        let mut attempt = 1u32;

        loop {
            debug!("Fetching page {} (attempt {}/{})", page, attempt, retry.max_attempts);
            match self.fetcher.fetch(url).await {
                FetchOutcome::Success(body) => return Some(body),
                FetchOutcome::HttpError(status) => {
                    warn!("⚠️ HTTP {} on page {} ({})", status, page, url);
                }
                FetchOutcome::TransportError(cause) => {
                    warn!("⚠️ Request failed on page {}: {}", page, cause);
                }
            }

            if !retry.should_retry(attempt) {
                if retry.max_attempts > 1 {
                    warn!("Page {} failed after {} attempts, skipping", page, attempt);
                }
                return None;
            }

            let delay = retry.delay_for(attempt);
            debug!("Retrying page {} in {:?}", page, delay);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
