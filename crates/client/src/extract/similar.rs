//! Similar-parts table.
//!
//! The same table can be read two ways; [`SimilarPartsStrategy`] picks one.
//! - Serial-number list: one part number per grouping element.
//! - Spec matrix: the table is a comparison grid with one product per column
//!   and one attribute per row, the attribute label in a right-aligned cell.

use std::collections::BTreeMap;

use partscope_core::{SelectorContract, SimilarPartsStrategy, SimilarProduct};
use scraper::ElementRef;

use super::document::{Document, Query, attr, non_empty, stripped_text, trimmed_text};

/// Output of whichever strategy ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimilarParts {
    SerialNumbers(Vec<String>),
    SpecMatrix(Vec<SimilarProduct>),
}

/// Run the selected strategy.
pub fn extract_similar_parts(
    doc: &Document, contract: &SelectorContract, strategy: SimilarPartsStrategy,
) -> Option<SimilarParts> {
    match strategy {
        SimilarPartsStrategy::SerialNumberList => {
            extract_similar_part_numbers(doc, contract).map(SimilarParts::SerialNumbers)
        }
        SimilarPartsStrategy::SpecMatrix => extract_similar_products(doc, contract).map(SimilarParts::SpecMatrix),
    }
}

/// Second anchor of every grouping element that has at least two.
///
/// The first anchor is the manufacturer link; groups with fewer than two
/// anchors contribute nothing.
pub fn extract_similar_part_numbers(doc: &Document, contract: &SelectorContract) -> Option<Vec<String>> {
    let table = doc.root().find(&contract.similar_table)?;

    let part_numbers: Vec<String> = table
        .find_all(&contract.similar_group)
        .into_iter()
        .filter_map(|group| group.find_all_tag("a").get(1).map(|a| trimmed_text(*a)))
        .collect();

    tracing::debug!(parts = part_numbers.len(), "parsed similar part numbers");

    if part_numbers.is_empty() { None } else { Some(part_numbers) }
}

/// One record per product column of the comparison grid.
///
/// Row 0 names the columns, row 1 holds the product link and stock badge,
/// every later row is an attribute keyed by its label cell. The first cell
/// of each row is the label column and is skipped.
pub fn extract_similar_products(doc: &Document, contract: &SelectorContract) -> Option<Vec<SimilarProduct>> {
    let table = doc.root().find(&contract.similar_table)?;
    let rows = table.find_all_tag("tr");

    let names: Vec<String> = rows
        .first()
        .map(|row| row.find_all_tag("td").into_iter().skip(1).map(stripped_text).collect())
        .unwrap_or_default();

    let product_cells: Vec<ElementRef<'_>> =
        rows.get(1).map(|row| row.find_all_tag("td").into_iter().skip(1).collect()).unwrap_or_default();

    let attribute_rows: Vec<(String, Vec<ElementRef<'_>>)> = rows
        .iter()
        .skip(2)
        .filter_map(|row| {
            let label = non_empty(stripped_text(row.find(&contract.similar_label)?))?;
            Some((label, row.find_all_tag("td")))
        })
        .collect();

    let products: Vec<SimilarProduct> = product_cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let specs: BTreeMap<String, Option<String>> = attribute_rows
                .iter()
                .map(|(label, cells)| {
                    let value = cells.get(index + 1).map(|c| stripped_text(*c)).and_then(non_empty);
                    (label.clone(), value)
                })
                .collect();

            SimilarProduct {
                name: names.get(index).cloned().and_then(non_empty),
                product_link: cell.select_css("a[href]").first().and_then(|a| attr(*a, "href")),
                stock: cell.find(&contract.similar_stock).map(stripped_text).and_then(non_empty),
                specs,
            }
        })
        .collect();

    tracing::debug!(products = products.len(), attributes = attribute_rows.len(), "parsed similar-parts matrix");

    if products.is_empty() { None } else { Some(products) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIAL: &str = r#"
        <table id="SimilarPartsTable"><tr><td>
            <div class="flex flex-col items-center gap-1">
                <a href="/m/murata">Murata</a>
                <a href="/p/1"> GRM188R71H104KA93D </a>
                <a href="/p/1/buy">Buy</a>
            </div>
            <div class="flex flex-col items-center gap-1">
                <a href="/m/tdk">TDK</a>
            </div>
            <div class="flex flex-col items-center gap-1">
                <a href="/m/kemet">KEMET</a><a href="/p/2">C0603C104K5RACTU</a>
            </div>
            <div class="flex flex-col gap-1">
                <a href="/m/x">X</a><a href="/p/3">NOT-MATCHED</a>
            </div>
        </td></tr></table>
    "#;

    const MATRIX: &str = r#"
        <table id="SimilarPartsTable">
            <tr><td></td><td>Part A</td><td>Part B</td></tr>
            <tr>
                <td></td>
                <td><a href="/p/a">A</a><span class="text-success">In Stock</span></td>
                <td><a>no href</a><a href="/p/b">B</a></td>
            </tr>
            <tr><td class="!text-right">Capacitance</td><td>0.1 µF</td><td>0.22 µF</td></tr>
            <tr><td class="!text-right">Voltage</td><td>50V</td></tr>
            <tr><td>unlabelled</td><td>x</td><td>y</td></tr>
        </table>
    "#;

    #[test]
    fn test_serial_numbers_second_anchor_only() {
        let doc = Document::parse(SERIAL);
        let parts = extract_similar_part_numbers(&doc, &SelectorContract::default()).unwrap();
        assert_eq!(parts, vec!["GRM188R71H104KA93D", "C0603C104K5RACTU"]);
    }

    #[test]
    fn test_serial_numbers_single_anchor_groups_only() {
        let doc = Document::parse(
            r#"<table id="SimilarPartsTable"><tr><td>
                <div class="flex flex-col items-center gap-1"><a>Only</a></div>
            </td></tr></table>"#,
        );
        assert!(extract_similar_part_numbers(&doc, &SelectorContract::default()).is_none());
    }

    #[test]
    fn test_serial_numbers_no_table() {
        let doc = Document::parse("<div></div>");
        assert!(extract_similar_part_numbers(&doc, &SelectorContract::default()).is_none());
    }

    #[test]
    fn test_spec_matrix_columns() {
        let doc = Document::parse(MATRIX);
        let products = extract_similar_products(&doc, &SelectorContract::default()).unwrap();
        assert_eq!(products.len(), 2);

        let a = &products[0];
        assert_eq!(a.name.as_deref(), Some("Part A"));
        assert_eq!(a.product_link.as_deref(), Some("/p/a"));
        assert_eq!(a.stock.as_deref(), Some("In Stock"));
        assert_eq!(a.specs["Capacitance"].as_deref(), Some("0.1 µF"));
        assert_eq!(a.specs["Voltage"].as_deref(), Some("50V"));
        assert!(!a.specs.contains_key("unlabelled"));

        let b = &products[1];
        assert_eq!(b.product_link.as_deref(), Some("/p/b"));
        assert_eq!(b.stock, None);
        assert_eq!(b.specs["Capacitance"].as_deref(), Some("0.22 µF"));
        assert_eq!(b.specs["Voltage"], None);
    }

    #[test]
    fn test_spec_matrix_header_only_is_absent() {
        let doc = Document::parse(r#"<table id="SimilarPartsTable"><tr><td></td><td>A</td></tr></table>"#);
        assert!(extract_similar_products(&doc, &SelectorContract::default()).is_none());
    }

    #[test]
    fn test_strategy_dispatch() {
        let doc = Document::parse(MATRIX);
        let contract = SelectorContract::default();
        assert!(matches!(
            extract_similar_parts(&doc, &contract, SimilarPartsStrategy::SpecMatrix),
            Some(SimilarParts::SpecMatrix(_))
        ));
        assert_eq!(extract_similar_parts(&doc, &contract, SimilarPartsStrategy::SerialNumberList), None);
    }
}
