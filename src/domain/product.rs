use serde::{Deserialize, Serialize};

use super::constants::sentinel;

/// Product record as extracted from a catalog listing card.
///
/// All fields are raw strings; `price` is not guaranteed to be numeric and
/// may hold the "price on request" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub sku: String,
    pub name: String,
    pub link: String,
    pub price: String,
}

impl ProductRecord {
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        link: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            link: link.into(),
            price: price.into(),
        }
    }

    /// Parse the price as a finite number.
    ///
    /// Surrounding whitespace is ignored. Sentinels, empty strings and
    /// non-finite values (`NaN`, `inf`) yield `None`.
    pub fn parsed_price(&self) -> Option<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// Whether the price field carries the "price on request" sentinel
    pub fn is_price_on_request(&self) -> bool {
        self.price == sentinel::PRICE_ON_REQUEST
    }
}

/// A numeric price paired with the product name it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub name: String,
    pub price: f64,
}

impl PriceSample {
    pub fn from_record(record: &ProductRecord) -> Option<Self> {
        record.parsed_price().map(|price| Self {
            name: record.name.clone(),
            price,
        })
    }
}
