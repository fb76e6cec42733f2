//! DOM query surface
//!
//! The scraper and watcher only see the page through [`Dom`], so tests (and
//! hosts) can supply any document. [`HtmlDocument`] is the scraper-backed
//! implementation used for saved pages and DOM snapshots.

use scraper::{Html, Selector};

/// CSS-selector access to the live document
pub trait Dom {
    /// Trimmed text content of the first element matching `selector`
    fn first_text(&self, selector: &str) -> Option<String>;

    /// Attribute value of the first element matching `selector`
    fn first_attr(&self, selector: &str, attr_name: &str) -> Option<String>;

    fn exists(&self, selector: &str) -> bool;
}

/// Parsed HTML document
pub struct HtmlDocument {
    document: Html,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }
}

impl Dom for HtmlDocument {
    fn first_text(&self, selector_str: &str) -> Option<String> {
        let selector = Selector::parse(selector_str).ok()?;

        self.document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    fn first_attr(&self, selector_str: &str, attr_name: &str) -> Option<String> {
        let selector = Selector::parse(selector_str).ok()?;

        self.document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(attr_name).map(String::from))
    }

    fn exists(&self, selector_str: &str) -> bool {
        match Selector::parse(selector_str) {
            Ok(selector) => self.document.select(&selector).next().is_some(),
            Err(_) => false,
        }
    }
}

/// True if the HTML fragment has an element carrying `class_name`, either the
/// fragment root or any descendant.
pub fn fragment_has_class(fragment: &str, class_name: &str) -> bool {
    let html = Html::parse_fragment(fragment);
    html.root_element()
        .descendants()
        .filter_map(scraper::ElementRef::wrap)
        .any(|el| el.value().has_class(class_name, scraper::CaseSensitivity::CaseSensitive))
}

/// True if the HTML fragment matches `selector` at its root or below.
pub fn fragment_matches(fragment: &str, selector_str: &str) -> bool {
    let selector = match Selector::parse(selector_str) {
        Ok(s) => s,
        Err(_) => return false,
    };

    Html::parse_fragment(fragment).select(&selector).next().is_some()
}
