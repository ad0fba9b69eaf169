//! Free-text panels: bullet-point long description and referenced names.

use partscope_core::{Locator, SelectorContract};

use super::document::{Document, Query, stripped_text};

/// Text of every element matched by `locator`, in document order.
fn collect_texts(doc: &Document, locator: &Locator) -> Vec<String> {
    doc.root().find_all(locator).into_iter().map(stripped_text).collect()
}

/// Long description bullets joined with single spaces.
pub fn extract_long_description(doc: &Document, contract: &SelectorContract) -> Option<String> {
    let texts = collect_texts(doc, &contract.long_description);
    if texts.is_empty() { None } else { Some(texts.join(" ")) }
}

pub fn extract_referenced_names(doc: &Document, contract: &SelectorContract) -> Option<Vec<String>> {
    let names = collect_texts(doc, &contract.referenced_names);
    if names.is_empty() { None } else { Some(names) }
}
