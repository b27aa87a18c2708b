//! Match list extraction from a live scores listing page.
//!
//! Candidates come from the first selector in [`CANDIDATE_SELECTORS`] (or the
//! match-link fallback) that finds anything. Each candidate is reduced to a
//! title and an absolute URL and then checked by [`MatchFilter`].

use crate::config::{ConfigError, HtmlSourceConfig};
use crate::filter::MatchFilter;
use crate::parsers::{RawDocument, static_selector};
use crate::results::MatchSummary;
use crate::utils::{element_text, resolve_href};
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

/// Card-like containers, tried in order before falling back to match links
const CANDIDATE_SELECTORS: [&str; 2] = [
    "div.ds-p-4",
    "div.ds-flex.ds-flex-col.ds-mt-2 > div.ds-mb-4",
];

const TITLE_SELECTOR: &str = "p.ds-text-tight-m.ds-font-bold.ds-truncate.ds-text-typo";
const GENERIC_TITLE_SELECTOR: &str = "span[class*='title'], h2, h3, p.ci-match-title";

static CANDIDATES: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CANDIDATE_SELECTORS
        .iter()
        .copied()
        .map(static_selector)
        .collect()
});
static TITLE: LazyLock<Selector> = LazyLock::new(|| static_selector(TITLE_SELECTOR));
static GENERIC_TITLE: LazyLock<Selector> =
    LazyLock::new(|| static_selector(GENERIC_TITLE_SELECTOR));
static SPAN: LazyLock<Selector> = LazyLock::new(|| static_selector("span"));
static LINK: LazyLock<Selector> = LazyLock::new(|| static_selector("a[href]"));

/// Extracts live matches from listing pages
#[derive(Debug, Default)]
pub struct ListingExtractor {
    filter: MatchFilter,
}

impl ListingExtractor {
    /// Create an extractor for the configured match-path marker
    pub fn new(config: &HtmlSourceConfig) -> Result<Self, ConfigError> {
        let filter = MatchFilter::with_marker(&config.match_path_marker)?;
        Ok(Self { filter })
    }

    /// Extracts the live matches in document order
    pub fn extract(&self, html: &str, base_url: &str) -> Vec<MatchSummary> {
        if html.trim().is_empty() {
            ::log::debug!("Listing document is empty");
            return Vec::new();
        }

        let doc = RawDocument::parse(html, base_url);
        let candidates = self.candidates(&doc);
        ::log::debug!("Found {} potential match elements", candidates.len());

        let mut matches = Vec::new();
        for candidate in candidates {
            let title = candidate_title(&candidate);
            let url = candidate_url(&candidate, &doc).unwrap_or_default();

            match self.filter.check(&title, &url) {
                Ok(()) => {
                    ::log::debug!("Found match: {} - {}", title, url);
                    matches.push(MatchSummary::new(title, url));
                }
                Err(reason) => {
                    ::log::debug!(
                        "Skipping candidate ({:?}). Title: '{}', URL: '{}'",
                        reason,
                        title,
                        url
                    );
                }
            }
        }

        ::log::info!("Listing extraction found {} matches", matches.len());
        matches
    }

    /// Returns the first non-empty candidate set
    fn candidates<'a>(&self, doc: &'a RawDocument) -> Vec<ElementRef<'a>> {
        for (i, selector) in CANDIDATES.iter().enumerate() {
            let found = doc.select_all(selector);
            if !found.is_empty() {
                return found;
            }
            ::log::debug!("Selector '{}' found 0 elements", CANDIDATE_SELECTORS[i]);
        }

        ::log::debug!("Falling back to links containing '{}'", self.filter.marker());
        doc.select_all(&LINK)
            .into_iter()
            .filter(|link| {
                link.value()
                    .attr("href")
                    .is_some_and(|href| self.filter.is_match_url(href))
            })
            .collect()
    }
}

/// Extracts live matches using the default configuration
pub fn extract_matches(html: &str, base_url: &str) -> Vec<MatchSummary> {
    ListingExtractor::default().extract(html, base_url)
}

fn is_link(element: &ElementRef) -> bool {
    element.value().name() == "a"
}

fn candidate_title(candidate: &ElementRef) -> String {
    if let Some(title) = candidate
        .select(&TITLE)
        .next()
        .or_else(|| candidate.select(&GENERIC_TITLE).next())
    {
        return element_text(&title);
    }

    if is_link(candidate) {
        return match candidate.select(&SPAN).next() {
            Some(span) => element_text(&span),
            None => element_text(candidate),
        };
    }

    String::new()
}

fn candidate_url(candidate: &ElementRef, doc: &RawDocument) -> Option<String> {
    let link = match candidate.select(&LINK).next() {
        Some(link) => link,
        None if is_link(candidate) => *candidate,
        None => return None,
    };

    let href = link.value().attr("href")?;
    resolve_href(doc.base(), href)
}
