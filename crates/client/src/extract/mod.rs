//! Structured product extraction from part detail pages.
//!
//! ### Field Extractors
//! - One routine per field group, each reading the shared [`Document`] only.
//! - Missing markup yields `None`; no extractor returns an error.
//! - Element lookups go through the [`SelectorContract`], never inline literals.
//!
//! ### Stable Abstraction
//! - Uses the `Extractor` trait so callers do not depend on the concrete assembler.
//!
//! ### Record Assembly
//! - [`PartExtractor`] runs every extractor in a fixed order and is the only
//!   place that shapes the final [`ProductRecord`].

pub mod catalog;
pub mod document;
pub mod offers;
pub mod panels;
pub mod risks;
pub mod similar;
pub mod specs;
pub mod title;

pub use document::{Document, Query};
pub use similar::SimilarParts;

use partscope_core::{AppConfig, ProductRecord, SelectorContract, SimilarPartsStrategy};

/// Stable extractor trait for product extraction.
///
/// This allows swapping the extraction engine later without changing callers.
pub trait Extractor: Send + Sync {
    /// Extract a product record from a parsed document.
    fn extract(&self, document: &Document) -> ProductRecord;

    /// Parse `html` and extract from it.
    fn extract_html(&self, html: &str) -> ProductRecord {
        self.extract(&Document::parse(html))
    }
}

/// Selector-contract driven extractor for part detail pages.
#[derive(Debug, Clone, Default)]
pub struct PartExtractor {
    contract: SelectorContract,
    strategy: SimilarPartsStrategy,
}

impl PartExtractor {
    /// Create an extractor with the default selector contract and strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the selector contract and similar-parts strategy from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self { contract: config.selectors.clone(), strategy: config.similar_parts_strategy }
    }

    pub fn with_contract(mut self, contract: SelectorContract) -> Self {
        self.contract = contract;
        self
    }

    pub fn with_strategy(mut self, strategy: SimilarPartsStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn contract(&self) -> &SelectorContract {
        &self.contract
    }

    pub fn strategy(&self) -> SimilarPartsStrategy {
        self.strategy
    }
}

impl Extractor for PartExtractor {
    fn extract(&self, document: &Document) -> ProductRecord {
        let contract = &self.contract;

        let title = title::extract_title(document, contract);
        let (categories, description) = match catalog::extract_categories(document, contract) {
            Some((categories, description)) => (Some(categories), description),
            None => (None, None),
        };
        let product_link = catalog::extract_product_link(document, contract);
        let risks = risks::extract_risks(document, contract);
        let specifications = specs::extract_specifications(document, contract);
        let (similar_parts, similar_products) =
            match similar::extract_similar_parts(document, contract, self.strategy) {
                Some(SimilarParts::SerialNumbers(parts)) => (Some(parts), None),
                Some(SimilarParts::SpecMatrix(products)) => (None, Some(products)),
                None => (None, None),
            };
        let distributor_offers = offers::extract_offers(document, contract);
        let long_description = panels::extract_long_description(document, contract);
        let referenced_names = panels::extract_referenced_names(document, contract);

        let record = ProductRecord {
            manufacturer: title.manufacturer,
            part_number: title.part_number,
            availability_status: title.availability_status,
            categories,
            description,
            product_link,
            risks,
            distributor_offers,
            specifications,
            similar_parts,
            similar_products,
            long_description,
            referenced_names,
        };

        tracing::debug!(
            part_number = record.part_number.as_deref().unwrap_or("-"),
            offers = record.distributor_offers.as_ref().map_or(0, Vec::len),
            specs = record.specifications.as_ref().map_or(0, |s| s.len()),
            strategy = ?self.strategy,
            "assembled product record"
        );

        record
    }
}

/// Extract a product record from HTML using the default extractor.
///
/// This is a convenience function that uses [`PartExtractor`] with the
/// default selector contract.
pub fn extract_record(html: &str) -> ProductRecord {
    PartExtractor::new().extract_html(html)
}
