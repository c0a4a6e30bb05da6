//! Product list parser for catalog listing pages
//!
//! Extracts one `ProductRecord` per product card. Fields missing from a card
//! are replaced with sentinel strings rather than dropping the record.

#![allow(clippy::uninlined_format_args)]

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::config::ExtractorSelectors;
use super::{ParsingError, ParsingResult, RecordExtractor};
use crate::domain::constants::sentinel;
use crate::domain::product::ProductRecord;

/// Parser for extracting product records from listing pages
#[derive(Debug, Clone)]
pub struct ProductListParser {
    card_selector: Selector,
    sku_selector: Selector,
    name_meta_selector: Selector,
    price_selector: Selector,
    name_attribute: String,
    link_attribute: String,
    price_attribute: String,
}

impl ProductListParser {
    /// Create a new product list parser with default selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ExtractorSelectors::default())
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &ExtractorSelectors) -> ParsingResult<Self> {
        for (field, attribute) in [
            ("name_attribute", &selectors.name_attribute),
            ("link_attribute", &selectors.link_attribute),
            ("price_attribute", &selectors.price_attribute),
        ] {
            if attribute.trim().is_empty() {
                return Err(ParsingError::configuration(field, "attribute name must not be empty"));
            }
        }

        Ok(Self {
            card_selector: Self::compile_selector("product_card", &selectors.product_card)?,
            sku_selector: Self::compile_selector("sku", &selectors.sku)?,
            name_meta_selector: Self::compile_selector("name_meta", &selectors.name_meta)?,
            price_selector: Self::compile_selector("price", &selectors.price)?,
            name_attribute: selectors.name_attribute.clone(),
            link_attribute: selectors.link_attribute.clone(),
            price_attribute: selectors.price_attribute.clone(),
        })
    }

    fn compile_selector(field: &str, selector: &str) -> ParsingResult<Selector> {
        Selector::parse(selector)
            .map_err(|e| ParsingError::invalid_selector(field, selector, &e.to_string()))
    }

    /// Extract a record from one product card
    fn extract_record(&self, card: &ElementRef) -> ProductRecord {
        let name = card
            .value()
            .attr(&self.name_attribute)
            .map_or_else(|| sentinel::UNSPECIFIED.to_string(), str::to_string);

        let sku = card
            .select(&self.sku_selector)
            .next()
            .map_or_else(
                || sentinel::UNSPECIFIED.to_string(),
                |element| element.text().collect::<String>().trim().to_string(),
            );

        let link = self
            .link_after_name_meta(card)
            .unwrap_or_else(|| sentinel::NO_LINK.to_string());

        let price = card
            .select(&self.price_selector)
            .next()
            .and_then(|element| element.value().attr(&self.price_attribute))
            .map_or_else(|| sentinel::PRICE_ON_REQUEST.to_string(), str::to_string);

        ProductRecord { sku, name, link, price }
    }

    /// The link lives on the element right after the name meta tag in
    /// document order, within the card.
    fn link_after_name_meta(&self, card: &ElementRef) -> Option<String> {
        let meta = card.select(&self.name_meta_selector).next()?;
        let mut elements = card.descendants().filter_map(ElementRef::wrap);
        elements.find(|element| *element == meta)?;
        elements
            .next()
            .and_then(|element| element.value().attr(&self.link_attribute))
            .map(str::to_string)
    }
}

impl RecordExtractor for ProductListParser {
    fn extract(&self, body: &str) -> Vec<ProductRecord> {
        let document = Html::parse_document(body);
        let records: Vec<ProductRecord> = document
            .select(&self.card_selector)
            .map(|card| self.extract_record(&card))
            .collect();

        debug!("Extracted {} product cards", records.len());
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
          <div class="catalog">
            <div class="product-card" data-product-name="Гипсокартон Knauf ГКЛ 12.5 мм">
              <span class="product-card__key"> 10234 </span>
              <meta itemprop="name" content="Гипсокартон Knauf">
              <a href="https://glavsnab.net/gkl-knauf.html">Гипсокартон Knauf</a>
              <span itemprop="price" content="389.00">389 ₽</span>
            </div>
            <div class="product-card" data-product-name="Профиль ПП 60x27">
              <span class="product-card__key">20511</span>
              <span class="price-request">Цена по запросу</span>
            </div>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parser_creation() {
        let parser = ProductListParser::new();
        assert!(parser.is_ok());
    }

    #[test]
    fn extracts_complete_card() {
        let parser = ProductListParser::new().unwrap();
        let records = parser.extract(LISTING);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.sku, "10234");
        assert_eq!(first.name, "Гипсокартон Knauf ГКЛ 12.5 мм");
        assert_eq!(first.link, "https://glavsnab.net/gkl-knauf.html");
        assert_eq!(first.price, "389.00");
    }

    #[test]
    fn missing_fields_become_sentinels() {
        let parser = ProductListParser::new().unwrap();
        let records = parser.extract(LISTING);

        let second = &records[1];
        assert_eq!(second.sku, "20511");
        assert_eq!(second.link, sentinel::NO_LINK);
        assert_eq!(second.price, sentinel::PRICE_ON_REQUEST);

        let bare = parser.extract(r#"<div class="product-card"></div>"#);
        assert_eq!(bare.len(), 1);
        assert_eq!(bare[0].name, sentinel::UNSPECIFIED);
        assert_eq!(bare[0].sku, sentinel::UNSPECIFIED);
    }

    #[test]
    fn page_without_cards_yields_nothing() {
        let parser = ProductListParser::new().unwrap();
        assert!(parser.extract("<html><body><p>Ничего не найдено</p></body></html>").is_empty());
        assert!(parser.extract("").is_empty());
    }

    #[test]
    fn invalid_selector_is_reported() {
        let selectors = ExtractorSelectors {
            price: "span[itemprop=".to_string(),
            ..ExtractorSelectors::default()
        };
        let err = ProductListParser::with_config(&selectors).unwrap_err();
        assert!(matches!(err, ParsingError::InvalidSelector { ref field, .. } if field == "price"));
    }

    #[test]
    fn empty_attribute_name_is_rejected() {
        let selectors = ExtractorSelectors {
            link_attribute: " ".to_string(),
            ..ExtractorSelectors::default()
        };
        assert!(matches!(
            ProductListParser::with_config(&selectors),
            Err(ParsingError::ConfigurationError { .. })
        ));
    }
}
