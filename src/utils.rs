use scraper::ElementRef;
use std::time::Duration;
use url::Url;

/// Collapses all runs of whitespace into single spaces and trims the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the normalized text content of an element and its descendants.
///
/// Text nodes are concatenated as they appear, so inline markup inside a score
/// such as `IND <b>123</b>/4` reads back as "IND 123/4".
pub fn element_text(element: &ElementRef) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Resolves an href against an optional base URL into an absolute URL string.
///
/// Returns `None` when the href cannot be made absolute.
pub fn resolve_href(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let resolved = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };

    match resolved {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            ::log::trace!("Could not resolve href '{}': {}", href, e);
            None
        }
    }
}

/// Builds a duration from a whole number of seconds, treating zero as "use the fallback"
pub fn secs_or(seconds: u64, fallback: u64) -> Duration {
    if seconds == 0 {
        Duration::from_secs(fallback)
    } else {
        Duration::from_secs(seconds)
    }
}
