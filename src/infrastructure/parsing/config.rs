//! Parsing configuration for HTML extraction
//!
//! Centralized configuration for the CSS selectors and attribute names used
//! to pull product records out of catalog listing pages.

use serde::{Deserialize, Serialize};

/// CSS selectors and attributes for product listing cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSelectors {
    /// Selector for one product card
    pub product_card: String,

    /// Card attribute holding the product name
    pub name_attribute: String,

    /// Selector (inside the card) for the sku element; its text is the sku
    pub sku: String,

    /// Selector for the name meta tag; the element after it carries the link
    pub name_meta: String,

    /// Attribute holding the link on the element after the name meta tag
    pub link_attribute: String,

    /// Selector for the price element
    pub price: String,

    /// Price element attribute holding the machine-readable price
    pub price_attribute: String,
}

impl Default for ExtractorSelectors {
    fn default() -> Self {
        Self {
            product_card: "div.product-card".to_string(),
            name_attribute: "data-product-name".to_string(),
            sku: "span.product-card__key".to_string(),
            name_meta: "meta[itemprop=\"name\"]".to_string(),
            link_attribute: "href".to_string(),
            price: "span[itemprop=\"price\"]".to_string(),
            price_attribute: "content".to_string(),
        }
    }
}
