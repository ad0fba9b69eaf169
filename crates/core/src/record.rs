//! The structured record produced by one extraction pass over a part detail page.
//!
//! Every top-level field is optional. Absence is an expected outcome when the
//! page does not carry the corresponding markup, so missing fields serialize
//! as `null` rather than being dropped: consumers always see the same key set.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Product data scraped from a single part detail page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Manufacturer name taken from the page heading.
    pub manufacturer: Option<String>,
    /// Manufacturer part number nested in the heading.
    pub part_number: Option<String>,
    /// Lifecycle badge text (e.g. "Active").
    pub availability_status: Option<String>,
    /// Breadcrumb categories, outermost first.
    pub categories: Option<Vec<Category>>,
    /// Short product summary shown next to the categories.
    pub description: Option<String>,
    /// Canonical product link advertised by the page.
    pub product_link: Option<ProductLink>,
    /// Lifecycle and supply-chain risk badges.
    pub risks: Option<RiskSummary>,
    /// One entry per distributor listing in the offers table.
    pub distributor_offers: Option<Vec<DistributorOffer>>,
    /// Flat specification list.
    pub specifications: Option<BTreeMap<String, String>>,
    /// Similar part numbers (serial-number list strategy).
    pub similar_parts: Option<Vec<String>>,
    /// Similar products with per-column attributes (spec-matrix strategy).
    pub similar_products: Option<Vec<SimilarProduct>>,
    /// Bullet-point long description joined into one string.
    pub long_description: Option<String>,
    /// Names listed in the referenced-names panel.
    pub referenced_names: Option<Vec<String>>,
}

impl ProductRecord {
    /// True when no extractor produced anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One breadcrumb entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProductLink {
    pub title: Option<String>,
    pub href: Option<String>,
}

/// Risk badges shown under the heading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub lifecycle_risk_name: Option<String>,
    pub lifecycle_risk_level: Option<String>,
    pub supply_chain_risk_name: Option<String>,
    pub supply_chain_risk_level: Option<String>,
}

/// One quantity tier of an offer's price ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PriceBreak {
    /// Quantity label as displayed (e.g. "1", "1,000").
    pub quantity: Option<String>,
    /// Price label as displayed, currency symbol included.
    pub price: Option<String>,
}

/// One distributor row of the offers table.
///
/// Quantities and prices are kept as the page renders them; no numeric or
/// currency normalization happens here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistributorOffer {
    pub distributor_id: Option<String>,
    pub currency: Option<String>,
    pub stock_quantity: Option<String>,
    pub manufacturer_id: Option<String>,
    pub sku: Option<String>,
    pub packaging: Option<String>,
    pub minimum_order_quantity: Option<u64>,
    pub seller_url: Option<String>,
    pub seller_image_url: Option<String>,
    pub seller_name: Option<String>,
    pub purchase_url: Option<String>,
    pub price_breaks: Vec<PriceBreak>,
    /// Remaining table columns keyed by header text.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub columns: BTreeMap<String, Option<String>>,
}

/// One column of the similar-parts comparison matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimilarProduct {
    pub name: Option<String>,
    pub product_link: Option<String>,
    pub stock: Option<String>,
    /// Attribute label → value for this column.
    pub specs: BTreeMap<String, Option<String>>,
}
