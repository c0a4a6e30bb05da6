//! Shared test doubles for the harvest loop

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use catalog_harvest_lib::domain::ProductRecord;
use catalog_harvest_lib::infrastructure::http_client::{FetchOutcome, PageFetcher};
use catalog_harvest_lib::infrastructure::parsing::RecordExtractor;

/// Page number carried by a listing URL (`...p=N`)
pub fn page_of(url: &str) -> u32 {
    url.rsplit("p=").next().and_then(|p| p.parse().ok()).unwrap_or(0)
}

/// Answers each page with a scripted outcome; unscripted pages are empty
pub struct ScriptedFetcher {
    pages: HashMap<u32, FetchOutcome>,
    pub requested: Mutex<Vec<u32>>,
}

impl ScriptedFetcher {
    pub fn new(pages: impl IntoIterator<Item = (u32, FetchOutcome)>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// `sizes[i]` records on page `i + 1`, then an empty page
    pub fn with_page_sizes(sizes: &[usize]) -> Self {
        Self::new(
            sizes
                .iter()
                .enumerate()
                .map(|(i, size)| (i as u32 + 1, FetchOutcome::Success(size.to_string()))),
        )
    }

    pub fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let page = page_of(url);
        self.requested.lock().unwrap().push(page);
        self.pages
            .get(&page)
            .cloned()
            .unwrap_or_else(|| FetchOutcome::Success("0".to_string()))
    }
}

/// Treats the body as a record count and fabricates that many records
pub struct CountExtractor;

impl RecordExtractor for CountExtractor {
    fn extract(&self, body: &str) -> Vec<ProductRecord> {
        let count: usize = body.trim().parse().unwrap_or(0);
        (0..count)
            .map(|i| {
                ProductRecord::new(
                    format!("sku-{i}"),
                    "Гипсокартон Knauf",
                    "https://shop.test/p",
                    format!("{}", 100 + i),
                )
            })
            .collect()
    }
}
