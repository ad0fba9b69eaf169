//! Heading and lifecycle badge.

use partscope_core::SelectorContract;

use super::document::{Document, Query, non_empty, trimmed_text};

/// Manufacturer, part number and availability status, each independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFields {
    pub manufacturer: Option<String>,
    pub part_number: Option<String>,
    pub availability_status: Option<String>,
}

/// Split the page heading into manufacturer and part number and read the status badge.
///
/// The part number is the text of the inline element nested in the heading;
/// the manufacturer is whatever heading text remains once it is removed.
/// Without a nested element the whole heading is the manufacturer.
pub fn extract_title(doc: &Document, contract: &SelectorContract) -> TitleFields {
    let root = doc.root();

    let availability_status = root.find(&contract.status_badge).map(trimmed_text).and_then(non_empty);

    let Some(heading) = root.find(&contract.heading) else {
        return TitleFields { availability_status, ..Default::default() };
    };

    let heading_text = heading.text().collect::<String>();
    let part_number = heading.find(&contract.part_number).map(trimmed_text).and_then(non_empty);

    let manufacturer = match &part_number {
        Some(model) => heading_text.replace(model.as_str(), "").trim().to_string(),
        None => heading_text.trim().to_string(),
    };

    TitleFields { manufacturer: non_empty(manufacturer), part_number, availability_status }
}
