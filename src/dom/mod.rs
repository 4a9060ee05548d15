//! Navigable HTML document capability.
//!
//! Analyzers that need a DOM depend on the [`HtmlDocument`] trait rather than on a
//! concrete parser. [`ParsedDocument`] implements it over `scraper::Html`; tests or
//! callers holding an already-parsed tree can provide their own implementation.

mod selector;

pub use selector::{parse_selector_unsafe, parse_selector_with_fallback};

use scraper::{ElementRef, Html};

/// Owned view of one matched element: tag name, attributes and text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSnapshot {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
}

impl ElementSnapshot {
    pub fn new(tag: &str, attributes: Vec<(String, String)>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes,
            text: text.into(),
        }
    }

    fn from_element(element: ElementRef<'_>) -> Self {
        let value = element.value();
        Self {
            tag: value.name().to_ascii_lowercase(),
            attributes: value
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            text: element.text().collect(),
        }
    }

    /// Lowercase tag name, e.g. `"h2"`.
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of all descendant text nodes (like DOM `textContent`).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|token| token == class))
            .unwrap_or(false)
    }
}

/// Selector-based queries over a parsed HTML document.
///
/// Invalid selectors match nothing; they never fail.
pub trait HtmlDocument {
    /// All elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<ElementSnapshot>;

    /// First element matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<ElementSnapshot> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Attribute of the document element (`<html>`).
    fn root_attr(&self, name: &str) -> Option<String>;

    /// Serialized markup of the document element.
    fn outer_html(&self) -> String;
}

/// An [`HtmlDocument`] backed by `scraper`.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn inner(&self) -> &Html {
        &self.html
    }
}

impl From<Html> for ParsedDocument {
    fn from(html: Html) -> Self {
        Self { html }
    }
}

impl HtmlDocument for ParsedDocument {
    fn query_selector_all(&self, selector: &str) -> Vec<ElementSnapshot> {
        let parsed = parse_selector_with_fallback(selector, "query_selector_all");
        self.html
            .select(&parsed)
            .map(ElementSnapshot::from_element)
            .collect()
    }

    fn query_selector(&self, selector: &str) -> Option<ElementSnapshot> {
        let parsed = parse_selector_with_fallback(selector, "query_selector");
        self.html
            .select(&parsed)
            .next()
            .map(ElementSnapshot::from_element)
    }

    fn root_attr(&self, name: &str) -> Option<String> {
        self.html
            .root_element()
            .value()
            .attr(name)
            .map(str::to_string)
    }

    fn outer_html(&self) -> String {
        self.html.root_element().html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <title> Sample Page </title>
    <meta name="description" content="A description">
  </head>
  <body>
    <nav class="top skip-link"><a href="/">Home</a></nav>
    <h1>Heading <span>One</span></h1>
    <img src="a.png" alt="A">
    <img src="b.png">
  </body>
</html>"#;

    #[test]
    fn test_query_selector_reads_text_and_attrs() {
        let doc = ParsedDocument::parse(SAMPLE);
        let title = doc.query_selector("title").unwrap();
        assert_eq!(title.text().trim(), "Sample Page");

        let meta = doc.query_selector(r#"meta[name="description"]"#).unwrap();
        assert_eq!(meta.attr("content"), Some("A description"));
        assert_eq!(meta.tag_name(), "meta");
    }

    #[test]
    fn test_text_includes_descendants() {
        let doc = ParsedDocument::parse(SAMPLE);
        let h1 = doc.query_selector("h1").unwrap();
        assert_eq!(h1.text(), "Heading One");
    }

    #[test]
    fn test_query_selector_all_in_document_order() {
        let doc = ParsedDocument::parse(SAMPLE);
        let images = doc.query_selector_all("img");
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].attr("alt"), Some("A"));
        assert_eq!(images[1].attr("alt"), None);
    }

    #[test]
    fn test_has_class() {
        let doc = ParsedDocument::parse(SAMPLE);
        let nav = doc.query_selector("nav").unwrap();
        assert!(nav.has_class("skip-link"));
        assert!(!nav.has_class("skip"));
    }

    #[test]
    fn test_root_attr_and_outer_html() {
        let doc = ParsedDocument::parse(SAMPLE);
        assert_eq!(doc.root_attr("lang"), Some("en".to_string()));
        assert!(doc.outer_html().starts_with("<html"));
    }

    #[test]
    fn test_invalid_selector_is_empty() {
        let doc = ParsedDocument::parse(SAMPLE);
        assert!(doc.query_selector_all("img[[").is_empty());
        assert!(doc.query_selector("img[[").is_none());
    }
}
