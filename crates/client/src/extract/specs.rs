//! Flat specification list (`<dt>`/`<dd>` pairs).

use std::collections::BTreeMap;

use partscope_core::SelectorContract;

use super::document::{Document, Query, stripped_text};

/// Pair the Nth term with the Nth value inside the specs container.
///
/// Surplus terms or values are ignored. A repeated term keeps its last value.
pub fn extract_specifications(doc: &Document, contract: &SelectorContract) -> Option<BTreeMap<String, String>> {
    let container = doc.root().find(&contract.specs_container)?;

    let terms = container.find_all(&contract.spec_term);
    let values = container.find_all(&contract.spec_value);

    let specs: BTreeMap<String, String> =
        terms.into_iter().zip(values).map(|(term, value)| (stripped_text(term), stripped_text(value))).collect();

    tracing::debug!(specs = specs.len(), "parsed specifications");

    Some(specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_terms_with_values() {
        let doc = Document::parse(
            r#"<div id="product-specs"><dl>
                <dt>Capacitance</dt><dd> 0.1 µF </dd>
                <dt>Voltage - Rated</dt><dd>50V</dd>
            </dl></div>"#,
        );
        let specs = extract_specifications(&doc, &SelectorContract::default()).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs["Capacitance"], "0.1 µF");
        assert_eq!(specs["Voltage - Rated"], "50V");
    }

    #[test]
    fn test_stops_at_shorter_sequence() {
        let doc = Document::parse(
            r#"<div id="product-specs"><dl>
                <dt>Tolerance</dt><dd>±10%</dd>
                <dt>Package</dt>
                <dt>Orphan</dt>
            </dl></div>"#,
        );
        let specs = extract_specifications(&doc, &SelectorContract::default()).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs["Tolerance"], "±10%");
    }

    #[test]
    fn test_missing_container() {
        let doc = Document::parse("<dl><dt>A</dt><dd>B</dd></dl>");
        assert!(extract_specifications(&doc, &SelectorContract::default()).is_none());
    }

    #[test]
    fn test_empty_container_is_empty_map() {
        let doc = Document::parse(r#"<div id="product-specs"></div>"#);
        let specs = extract_specifications(&doc, &SelectorContract::default()).unwrap();
        assert!(specs.is_empty());
    }
}
