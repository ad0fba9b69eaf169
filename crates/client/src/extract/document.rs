//! Read-only query layer over a parsed part page.
//!
//! Every extractor goes through [`Query`]; none of them touch `scraper`
//! selectors directly. All lookups return `None` or an empty `Vec` when
//! nothing matches, including when a CSS selector fails to parse.

use partscope_core::Locator;
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document. Parsing is lenient and never fails.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// The `<html>` element; queries on it search the whole document.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

/// Query primitives shared by all extractors.
pub trait Query<'a> {
    /// First descendant with the given tag name.
    fn find_tag(&self, tag: &str) -> Option<ElementRef<'a>>;

    /// First descendant with the given tag whose `class` attribute is exactly `class`.
    fn find_class(&self, tag: &str, class: &str) -> Option<ElementRef<'a>>;

    /// All descendants with the given tag name, in document order.
    fn find_all_tag(&self, tag: &str) -> Vec<ElementRef<'a>>;

    /// All descendants matching a CSS selector, in document order.
    fn select_css(&self, selector: &str) -> Vec<ElementRef<'a>>;

    /// All descendants matched by a locator.
    fn find_all(&self, locator: &Locator) -> Vec<ElementRef<'a>>;

    /// First descendant matched by a locator.
    fn find(&self, locator: &Locator) -> Option<ElementRef<'a>>;
}

impl<'a> Query<'a> for ElementRef<'a> {
    fn find_tag(&self, tag: &str) -> Option<ElementRef<'a>> {
        elements(*self).find(|el| has_tag(el, tag))
    }

    fn find_class(&self, tag: &str, class: &str) -> Option<ElementRef<'a>> {
        elements(*self).find(|el| has_tag(el, tag) && el.value().attr("class") == Some(class))
    }

    fn find_all_tag(&self, tag: &str) -> Vec<ElementRef<'a>> {
        elements(*self).filter(|el| has_tag(el, tag)).collect()
    }

    fn select_css(&self, selector: &str) -> Vec<ElementRef<'a>> {
        match Selector::parse(selector) {
            Ok(sel) => self.select(&sel).collect(),
            Err(e) => {
                tracing::warn!(selector, error = ?e, "invalid CSS selector, treating as no match");
                Vec::new()
            }
        }
    }

    fn find_all(&self, locator: &Locator) -> Vec<ElementRef<'a>> {
        match locator {
            Locator::Tag { tag } => self.find_all_tag(tag),
            Locator::Class { tag, class } => elements(*self)
                .filter(|el| has_tag(el, tag) && el.value().attr("class") == Some(class.as_str()))
                .collect(),
            Locator::Id { tag, id } => elements(*self)
                .filter(|el| has_tag(el, tag) && el.value().id() == Some(id.as_str()))
                .collect(),
            Locator::Css { selector } => self.select_css(selector),
        }
    }

    fn find(&self, locator: &Locator) -> Option<ElementRef<'a>> {
        match locator {
            Locator::Tag { tag } => self.find_tag(tag),
            Locator::Class { tag, class } => self.find_class(tag, class),
            Locator::Id { tag, id } => {
                elements(*self).find(|el| has_tag(el, tag) && el.value().id() == Some(id.as_str()))
            }
            Locator::Css { selector } => self.select_css(selector).into_iter().next(),
        }
    }
}

/// Descendant elements of `el`, excluding `el` itself.
fn elements(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.descendants().skip(1).filter_map(ElementRef::wrap)
}

fn has_tag(el: &ElementRef<'_>, tag: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(tag)
}

/// Descendant text concatenated as-is, then trimmed.
pub fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Each descendant text node trimmed, empty pieces dropped, joined without separator.
pub fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Like [`stripped_text`], skipping text under any element whose tag is in `excluded`.
///
/// This is a filtered view: the tree is left untouched, so reading the same
/// cell twice yields the same result.
pub fn stripped_text_excluding(el: ElementRef<'_>, excluded: &[String]) -> String {
    let root = el.id();
    el.descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().take_while(|a| a.id() != root).any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| excluded.iter().any(|tag| e.name().eq_ignore_ascii_case(tag)))
            });
            (!hidden).then(|| text.trim())
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Attribute value, `None` when missing or empty.
pub fn attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value().attr(name).filter(|v| !v.is_empty()).map(str::to_string)
}

/// `None` for empty strings.
pub fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <div class="flex py-0.5">exact</div>
            <div class="py-0.5 flex">reordered</div>
            <div class="flex py-0.5 mt-1">extra</div>
            <table id="Offers"><tr><td>
                Stock <button>Buy <b>now</b></button> 1,200
            </td></tr></table>
            <ul class="list"><li> one </li><li>two</li></ul>
        </body></html>
    "#;

    #[test]
    fn test_find_tag_first_match() {
        let doc = Document::parse(PAGE);
        let li = doc.root().find_tag("li").unwrap();
        assert_eq!(trimmed_text(li), "one");
    }

    #[test]
    fn test_find_class_is_exact() {
        let doc = Document::parse(PAGE);
        let root = doc.root();
        let hits = root.find_all(&Locator::class("div", "flex py-0.5"));
        assert_eq!(hits.len(), 1);
        assert_eq!(stripped_text(hits[0]), "exact");
        assert!(root.find_class("div", "flex").is_none());
    }

    #[test]
    fn test_find_by_id() {
        let doc = Document::parse(PAGE);
        assert!(doc.root().find(&Locator::id("table", "Offers")).is_some());
        assert!(doc.root().find(&Locator::id("div", "Offers")).is_none());
    }

    #[test]
    fn test_scoped_find_all() {
        let doc = Document::parse(PAGE);
        let ul = doc.root().find_tag("ul").unwrap();
        assert_eq!(ul.find_all_tag("li").len(), 2);
        assert!(ul.find_tag("div").is_none());
    }

    #[test]
    fn test_select_css() {
        let doc = Document::parse(PAGE);
        let items = doc.root().select_css("ul.list li");
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_invalid_css_is_no_match() {
        let doc = Document::parse(PAGE);
        assert!(doc.root().select_css("ul[[").is_empty());
        assert!(doc.root().find(&Locator::css("ul[[")).is_none());
    }

    #[test]
    fn test_stripped_text_joins_without_separator() {
        let doc = Document::parse("<p> a <b> b </b>  c </p>");
        let p = doc.root().find_tag("p").unwrap();
        assert_eq!(stripped_text(p), "abc");
        assert_eq!(trimmed_text(p), "a  b   c");
    }

    #[test]
    fn test_text_excluding_buttons_is_repeatable() {
        let doc = Document::parse(PAGE);
        let cell = doc.root().find_tag("td").unwrap();
        let excluded = vec!["button".to_string()];
        assert_eq!(stripped_text_excluding(cell, &excluded), "Stock1,200");
        assert_eq!(stripped_text_excluding(cell, &excluded), "Stock1,200");
        assert_eq!(stripped_text(cell), "StockBuynow1,200");
    }

    #[test]
    fn test_attr_empty_is_none() {
        let doc = Document::parse(r#"<a href="" title="T">x</a>"#);
        let a = doc.root().find_tag("a").unwrap();
        assert_eq!(attr(a, "href"), None);
        assert_eq!(attr(a, "title"), Some("T".to_string()));
        assert_eq!(attr(a, "missing"), None);
    }
}
