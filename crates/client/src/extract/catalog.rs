//! Category breadcrumb, summary and product link.

use partscope_core::{Category, ProductLink, SelectorContract};

use super::document::{Document, Query, attr, non_empty, trimmed_text};

/// Breadcrumb categories with the summary shown beside them.
///
/// Both are absent when the breadcrumb container is missing, even if the
/// summary element exists elsewhere on the page. With the container present,
/// the summary is looked up on its own and may still be absent.
pub fn extract_categories(
    doc: &Document, contract: &SelectorContract,
) -> Option<(Vec<Category>, Option<String>)> {
    let root = doc.root();
    let container = root.find(&contract.category_container)?;

    let categories: Vec<Category> = container
        .find_all(&contract.category_link)
        .into_iter()
        .map(|anchor| Category { category_name: trimmed_text(anchor) })
        .collect();

    let description = root.find(&contract.summary).map(trimmed_text).and_then(non_empty);

    tracing::debug!(categories = categories.len(), has_description = description.is_some(), "parsed breadcrumb");

    Some((categories, description))
}

/// Title and target of the product link anchor.
pub fn extract_product_link(doc: &Document, contract: &SelectorContract) -> Option<ProductLink> {
    let anchor = doc.root().find(&contract.product_link)?;
    Some(ProductLink { title: attr(anchor, "title"), href: attr(anchor, "href") })
}
