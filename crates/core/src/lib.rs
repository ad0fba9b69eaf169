//! Core types and shared functionality for partscope.
//!
//! This crate provides:
//! - The product record produced by one extraction pass
//! - The selector contract describing where each field lives in the markup
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod record;
pub mod selectors;

pub use config::{AppConfig, ConfigError, SimilarPartsStrategy};
pub use error::Error;
pub use record::{
    Category, DistributorOffer, PriceBreak, ProductLink, ProductRecord, RiskSummary, SimilarProduct,
};
pub use selectors::{Locator, SelectorContract};
