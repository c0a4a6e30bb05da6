//! Harvest loop termination and failure handling

mod common;

use std::sync::Arc;
use std::time::Duration;

use catalog_harvest_lib::application::{HarvestConfig, HarvestController, StatsEngine};
use catalog_harvest_lib::domain::StopReason;
use catalog_harvest_lib::infrastructure::http_client::FetchOutcome;
use common::{CountExtractor, ScriptedFetcher};
use proptest::prelude::*;

const BASE_URL: &str = "https://shop.test/catalog.html?limit=10";

fn controller(fetcher: Arc<ScriptedFetcher>, config: HarvestConfig) -> HarvestController {
    HarvestController::new(fetcher, Arc::new(CountExtractor), config.with_pacing(Duration::ZERO))
}

#[tokio::test]
async fn cap_reached_mid_page_stops_on_first_page() {
    let fetcher = Arc::new(ScriptedFetcher::with_page_sizes(&[10, 10, 10]));
    let outcome = controller(fetcher.clone(), HarvestConfig::new(BASE_URL, 5))
        .harvest()
        .await;

    assert_eq!(outcome.len(), 5);
    assert_eq!(outcome.stop_reason, StopReason::CapReached);
    assert_eq!(fetcher.requested(), vec![1]);
    let skus: Vec<&str> = outcome.records.iter().map(|r| r.sku.as_str()).collect();
    assert_eq!(skus, vec!["sku-0", "sku-1", "sku-2", "sku-3", "sku-4"]);
}

#[tokio::test]
async fn transport_errors_only_yield_no_data() {
    let fetcher = Arc::new(ScriptedFetcher::new(
        (1..=5).map(|page| (page, FetchOutcome::TransportError("connection refused".to_string()))),
    ));
    let outcome = controller(fetcher.clone(), HarvestConfig::new(BASE_URL, 100))
        .harvest()
        .await;

    assert!(outcome.is_empty());
    assert_eq!(outcome.failed_pages, vec![1, 2, 3, 4, 5]);
    // page 6 is the first successful page and it is empty
    assert_eq!(outcome.stop_reason, StopReason::CatalogExhausted);
    assert_eq!(fetcher.requested(), vec![1, 2, 3, 4, 5, 6]);
    assert!(StatsEngine::default().analyze(&outcome.records).is_none());
}

#[tokio::test]
async fn transport_errors_hit_failure_limit() {
    let fetcher = Arc::new(ScriptedFetcher::new(
        (1..=10).map(|page| (page, FetchOutcome::TransportError("timeout".to_string()))),
    ));
    let outcome = controller(
        fetcher.clone(),
        HarvestConfig::new(BASE_URL, 100).with_max_consecutive_failures(5),
    )
    .harvest()
    .await;

    assert!(outcome.is_empty());
    assert_eq!(outcome.stop_reason, StopReason::TooManyFailures);
    assert_eq!(fetcher.requested(), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn terminates_on_nth_empty_page() {
    let fetcher = Arc::new(ScriptedFetcher::with_page_sizes(&[4, 4, 4, 0, 4]));
    let outcome = controller(fetcher.clone(), HarvestConfig::new(BASE_URL, 1000))
        .harvest()
        .await;

    assert_eq!(outcome.len(), 12);
    assert_eq!(outcome.stop_reason, StopReason::CatalogExhausted);
    assert_eq!(outcome.pages_visited, 4);
    assert_eq!(fetcher.requested(), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn empty_page_is_not_retried() {
    let fetcher = Arc::new(ScriptedFetcher::with_page_sizes(&[0]));
    let retry = catalog_harvest_lib::infrastructure::RetryPolicy {
        max_attempts: 3,
        base_delay_ms: 0,
        jitter: false,
        ..Default::default()
    };
    let outcome = controller(fetcher.clone(), HarvestConfig::new(BASE_URL, 10).with_retry(retry))
        .harvest()
        .await;

    assert!(outcome.is_empty());
    assert_eq!(fetcher.requested(), vec![1]);
}

#[tokio::test]
async fn http_errors_are_skipped_with_pacing() {
    let fetcher = Arc::new(ScriptedFetcher::new([
        (1, FetchOutcome::Success("2".to_string())),
        (2, FetchOutcome::HttpError(502)),
        (3, FetchOutcome::Success("2".to_string())),
    ]));
    let config = HarvestConfig::new(BASE_URL, 100).with_pacing(Duration::from_millis(5));
    let controller = HarvestController::new(fetcher.clone(), Arc::new(CountExtractor), config);

    let started = std::time::Instant::now();
    let outcome = controller.harvest().await;

    assert_eq!(outcome.len(), 4);
    assert_eq!(outcome.failed_pages, vec![2]);
    // three paced gaps: after pages 1, 2 and 3
    assert!(started.elapsed() >= Duration::from_millis(15));
}

#[tokio::test]
async fn start_page_is_honoured() {
    let fetcher = Arc::new(ScriptedFetcher::with_page_sizes(&[1, 1, 1]));
    let mut config = HarvestConfig::new(BASE_URL, 100);
    config.start_page = 2;
    let outcome = controller(fetcher.clone(), config).harvest().await;

    assert_eq!(outcome.len(), 2);
    assert_eq!(fetcher.requested(), vec![2, 3, 4]);
}

#[tokio::test]
async fn page_budget_counts_requests_from_start_page() {
    let fetcher = Arc::new(ScriptedFetcher::with_page_sizes(&[1, 1, 1, 1, 1]));
    let mut config = HarvestConfig::new(BASE_URL, 100).with_max_pages(2);
    config.start_page = 3;
    let outcome = controller(fetcher.clone(), config).harvest().await;

    assert_eq!(outcome.stop_reason, StopReason::PageLimitReached);
    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(fetcher.requested(), vec![3, 4]);
}

#[tokio::test]
async fn no_content_page_is_skipped_not_exhaustion() {
    let fetcher = Arc::new(ScriptedFetcher::new([
        (1, FetchOutcome::HttpError(204)),
        (2, FetchOutcome::Success("1".to_string())),
    ]));
    let outcome = controller(fetcher, HarvestConfig::new(BASE_URL, 100)).harvest().await;

    assert_eq!(outcome.len(), 1);
    assert_eq!(outcome.failed_pages, vec![1]);
    assert_eq!(outcome.stop_reason, StopReason::CatalogExhausted);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn harvest_never_exceeds_cap(
        sizes in proptest::collection::vec(0usize..15, 0..8),
        max_items in 1usize..60,
    ) {
        let fetcher = Arc::new(ScriptedFetcher::with_page_sizes(&sizes));
        let outcome = tokio_test::block_on(controller(fetcher, HarvestConfig::new(BASE_URL, max_items)).harvest());

        prop_assert!(outcome.len() <= max_items);
        let available: usize = sizes.iter().take_while(|size| **size > 0).sum();
        prop_assert_eq!(outcome.len(), available.min(max_items));
        if outcome.len() == max_items {
            prop_assert_eq!(outcome.stop_reason, StopReason::CapReached);
        } else {
            prop_assert_eq!(outcome.stop_reason, StopReason::CatalogExhausted);
        }
    }
}
