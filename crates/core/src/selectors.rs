//! Selector contract for the part detail page.
//!
//! The page is generated by a utility-class CSS framework, so most fields can
//! only be located by their full, literal `class` attribute. Those literals
//! live here as data rather than inline in the extractors; retargeting the
//! scraper at different markup means overriding this table (e.g. from the
//! config file), not touching extraction logic.
//!
//! Class matching is exact-string on purpose: `"flex py-0.5"` does not match
//! `"py-0.5 flex"` or `"flex py-0.5 mt-1"`.

use serde::{Deserialize, Serialize};

/// How to find an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Locator {
    /// Any element with this tag name.
    Tag { tag: String },
    /// Element with this tag whose `class` attribute equals `class` exactly.
    Class { tag: String, class: String },
    /// Element with this tag and `id`.
    Id { tag: String, id: String },
    /// Arbitrary CSS selector.
    Css { selector: String },
}

impl Locator {
    pub fn tag(tag: &str) -> Self {
        Self::Tag { tag: tag.into() }
    }

    pub fn class(tag: &str, class: &str) -> Self {
        Self::Class { tag: tag.into(), class: class.into() }
    }

    pub fn id(tag: &str, id: &str) -> Self {
        Self::Id { tag: tag.into(), id: id.into() }
    }

    pub fn css(selector: &str) -> Self {
        Self::Css { selector: selector.into() }
    }
}

/// Field name → locator table for every extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorContract {
    /// Page heading carrying manufacturer and part number.
    pub heading: Locator,
    /// Inline element inside the heading holding the part number.
    pub part_number: Locator,
    /// Lifecycle status badge.
    pub status_badge: Locator,

    /// Breadcrumb container.
    pub category_container: Locator,
    /// Breadcrumb entries inside the container.
    pub category_link: Locator,
    /// Short summary text next to the breadcrumb.
    pub summary: Locator,
    pub product_link: Locator,

    /// Risk badge buttons (lifecycle first, supply chain second).
    pub risk_button: Locator,
    /// Nested element carrying risk name (first match) and level (last match).
    pub risk_part: Locator,

    pub offers_table: Locator,
    /// Cell holding the price ladder within an offer row.
    pub price_cell: Locator,
    /// One quantity tier inside the price cell.
    pub price_tier: Locator,
    /// Labels inside a tier: first is quantity, last is price.
    pub price_label: Locator,
    /// Anchor identifying the seller inside an offer cell.
    pub seller_link: Locator,
    /// Anchor inside the trailing actions cell.
    pub purchase_link: Locator,
    /// Tags whose subtrees never contribute to cell text.
    pub interactive_controls: Vec<String>,
    /// Header names that are never mapped to offer values.
    pub excluded_columns: Vec<String>,
    /// Header name of the compound "packaging (MOQ)" column.
    pub packaging_column: String,
    /// Header name of the distributor SKU column.
    pub sku_column: String,

    pub specs_container: Locator,
    pub spec_term: Locator,
    pub spec_value: Locator,

    pub similar_table: Locator,
    /// Per-part grouping element (serial-number list strategy).
    pub similar_group: Locator,
    /// Attribute label cell (spec-matrix strategy).
    pub similar_label: Locator,
    /// Stock badge inside a product column (spec-matrix strategy).
    pub similar_stock: Locator,

    pub long_description: Locator,
    pub referenced_names: Locator,
}

impl Default for SelectorContract {
    fn default() -> Self {
        Self {
            heading: Locator::tag("h1"),
            part_number: Locator::tag("span"),
            status_badge: Locator::class(
                "div",
                "rounded-sm font-bold text-lg px-3 py-1.5 text-success-900 bg-success-200 whitespace-nowrap",
            ),
            category_container: Locator::class("div", "flex flex-col gap-2"),
            category_link: Locator::tag("a"),
            summary: Locator::class("div", "lg:group-[.is-sticky]:hidden"),
            product_link: Locator::class("a", "block mb-4"),
            risk_button: Locator::class("button", "flex items-stretch"),
            risk_part: Locator::tag("span"),
            offers_table: Locator::id("table", "ExactMatchesTable"),
            price_cell: Locator::class("td", "text-nowrap"),
            price_tier: Locator::class("section", "flex py-0.5"),
            price_label: Locator::tag("span"),
            seller_link: Locator::class("a", "flex justify-center items-start"),
            purchase_link: Locator::css("a[href]"),
            interactive_controls: vec!["button".into()],
            excluded_columns: vec!["Datasheet".into(), "Pricing".into()],
            packaging_column: "Packaging".into(),
            sku_column: "SKU".into(),
            specs_container: Locator::id("div", "product-specs"),
            spec_term: Locator::tag("dt"),
            spec_value: Locator::tag("dd"),
            similar_table: Locator::id("table", "SimilarPartsTable"),
            similar_group: Locator::class("div", "flex flex-col items-center gap-1"),
            similar_label: Locator::class("td", "!text-right"),
            similar_stock: Locator::class("span", "text-success"),
            long_description: Locator::css("section.part-detail-section ul.panel-body li"),
            referenced_names: Locator::css("div.panel.py-4.px-8 div"),
        }
    }
}
