//! Distributor offers table: stock, seller and price ladder per row.
//!
//! Each body row carries its identifiers as `data-*` attributes on the `<tr>`;
//! the remaining values come from cells mapped onto the header row by
//! position. The last header is the actions column and is not mapped.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use partscope_core::{DistributorOffer, PriceBreak, SelectorContract};
use regex::Regex;
use scraper::ElementRef;

use super::document::{Document, Query, attr, non_empty, stripped_text, stripped_text_excluding};

/// Letters and spaces followed by a parenthesised integer, e.g. `Tray(2500)`.
static PACKAGING_MOQ: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z ]+)\((\d+)\)$").expect("valid packaging regex"));

/// Parse every offer row. `None` when the table is missing or has no body rows.
pub fn extract_offers(doc: &Document, contract: &SelectorContract) -> Option<Vec<DistributorOffer>> {
    let table = doc.root().find(&contract.offers_table)?;
    let body = table.find_tag("tbody")?;
    let headers = header_names(table);

    let offers: Vec<DistributorOffer> =
        body.find_all_tag("tr").into_iter().map(|row| parse_row(row, &headers, contract)).collect();

    tracing::debug!(columns = headers.len(), offers = offers.len(), "parsed offers table");

    if offers.is_empty() { None } else { Some(offers) }
}

/// Header texts in column order, trailing actions column dropped.
fn header_names(table: ElementRef<'_>) -> Vec<String> {
    let mut headers: Vec<String> = table
        .find_tag("thead")
        .map(|thead| thead.find_all_tag("th").into_iter().map(stripped_text).collect())
        .unwrap_or_default();
    headers.pop();
    headers
}

fn parse_row(row: ElementRef<'_>, headers: &[String], contract: &SelectorContract) -> DistributorOffer {
    let mut offer = DistributorOffer {
        distributor_id: attr(row, "data-dist"),
        currency: attr(row, "data-cur"),
        stock_quantity: attr(row, "data-stock-qty"),
        manufacturer_id: attr(row, "data-mfr"),
        price_breaks: price_breaks(row, contract),
        ..Default::default()
    };

    let mut columns: BTreeMap<String, Option<String>> = BTreeMap::new();

    for (index, cell) in row.find_all_tag("td").into_iter().enumerate() {
        if let Some(link) = cell.find(&contract.seller_link) {
            offer.seller_url = attr(link, "href");
            offer.seller_image_url = link.find_tag("img").and_then(|img| attr(img, "src"));
            offer.seller_name = attr(link, "title");
            continue;
        }

        let Some(column) = headers.get(index) else {
            // Only the cell under the dropped actions header holds the purchase link.
            if !headers.is_empty() && index == headers.len() {
                offer.purchase_url = cell.find(&contract.purchase_link).and_then(|a| attr(a, "href"));
            }
            continue;
        };

        if contract.excluded_columns.contains(column) {
            continue;
        }

        let text = stripped_text_excluding(cell, &contract.interactive_controls);
        columns.insert(column.clone(), non_empty(text));
    }

    let packaging_field = columns.remove(&contract.packaging_column).flatten();
    let (packaging, minimum_order_quantity) = split_packaging(packaging_field.as_deref());
    offer.packaging = packaging;
    offer.minimum_order_quantity = minimum_order_quantity;
    offer.sku = columns.remove(&contract.sku_column).flatten();
    offer.columns = columns;

    offer
}

/// Quantity/price pairs from each tier of the price cell, first occurrence kept.
fn price_breaks(row: ElementRef<'_>, contract: &SelectorContract) -> Vec<PriceBreak> {
    let Some(cell) = row.find(&contract.price_cell) else {
        return Vec::new();
    };

    let mut breaks: Vec<PriceBreak> = Vec::new();
    for tier in cell.find_all(&contract.price_tier) {
        let labels = tier.find_all(&contract.price_label);
        let [first, .., last] = labels.as_slice() else {
            continue;
        };
        let pair = PriceBreak { quantity: non_empty(stripped_text(*first)), price: non_empty(stripped_text(*last)) };
        if !breaks.contains(&pair) {
            breaks.push(pair);
        }
    }
    breaks
}

/// Split a `Packaging(MOQ)` field into its parts.
///
/// A field that does not fit the pattern is kept verbatim (trimmed) as the
/// packaging with no MOQ.
pub fn split_packaging(field: Option<&str>) -> (Option<String>, Option<u64>) {
    let Some(field) = field.map(str::trim) else {
        return (None, None);
    };

    if let Some(caps) = PACKAGING_MOQ.captures(field)
        && let Ok(moq) = caps[2].parse::<u64>()
    {
        return (non_empty(caps[1].trim().to_string()), Some(moq));
    }

    (non_empty(field.to_string()), None)
}
