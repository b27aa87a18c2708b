pub mod feed;
pub mod listing;
pub mod score;

#[cfg(test)]
mod tests;

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Enum to represent the kinds of documents a source can return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserType {
    /// HTML page, mined with selector heuristics
    Html,
    /// RSS/XML feed, read structurally
    Feed,
}

impl ParserType {
    /// Determines the parser type based on the URL
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.ends_with(".xml") || path.ends_with(".rss") || path.contains("/rss/") {
            ::log::debug!("Classifying as Feed: {}", url);
            ParserType::Feed
        } else {
            ::log::debug!("Classifying as HTML: {}", url);
            ParserType::Html
        }
    }
}

/// A parsed HTML page together with the URI its relative links resolve against
pub struct RawDocument {
    html: Html,
    base: Option<Url>,
}

impl RawDocument {
    /// Parses a whole HTML document.
    ///
    /// An unparsable base URL is logged and ignored; only absolute hrefs resolve then.
    pub fn parse(html: &str, base_url: &str) -> Self {
        let base = match Url::parse(base_url) {
            Ok(url) => Some(url),
            Err(e) => {
                ::log::warn!("Ignoring invalid base URL '{}': {}", base_url, e);
                None
            }
        };

        Self {
            html: Html::parse_document(html),
            base,
        }
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// All elements matching the selector, in document order
    pub fn select_all<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.html.select(selector).collect()
    }

    /// The first element matching the selector
    pub fn select_first<'a>(&'a self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.html.select(selector).next()
    }
}

/// Compiles a selector that is known at build time.
///
/// Only used for the literal selectors of the extractors, which are covered by tests.
pub(crate) fn static_selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector '{css}': {e}"))
}
