//! Score extraction from a single match page.
//!
//! Five strategies are tried in a fixed order and the first one that produces
//! a value wins. When none do, [`SCORE_NOT_AVAILABLE`] is returned.

use crate::parsers::{RawDocument, static_selector};
use crate::results::SCORE_NOT_AVAILABLE;
use crate::utils::element_text;
use regex::Regex;
use scraper::Selector;
use std::fmt;
use std::sync::LazyLock;

const SCORE_PANEL_SELECTOR: &str =
    "div.ds-text-compact-m.ds-text-typo-title.ds-text-right.ds-whitespace-nowrap";
const TEAM_NAME_SELECTOR: &str = "p.ds-text-tight-m.ds-font-bold.ds-truncate.ds-text-typo";
const SECONDARY_SELECTOR: &str =
    "div.ds-flex.ds-items-center.ds-justify-between.ds-mb-1 > div > span.ds-text-compact-s";
const BROAD_SELECTOR: &str = "div[class*='score'], span[class*='score'], p[class*='score'], \
                              div.ds-text-title-s, div.ds-text-typo-title";
const STATUS_SELECTOR: &str = "p.ds-text-tight-s.ds-font-regular.ds-line-clamp-2.ds-text-typo";

/// Broad matches longer than this are probably summaries rather than the score line
const LONG_SCORE_CHARS: usize = 50;

static SCORE_PANEL: LazyLock<Selector> = LazyLock::new(|| static_selector(SCORE_PANEL_SELECTOR));
static TEAM_NAME: LazyLock<Selector> = LazyLock::new(|| static_selector(TEAM_NAME_SELECTOR));
static SECONDARY: LazyLock<Selector> = LazyLock::new(|| static_selector(SECONDARY_SELECTOR));
static BROAD: LazyLock<Selector> = LazyLock::new(|| static_selector(BROAD_SELECTOR));
static STATUS: LazyLock<Selector> = LazyLock::new(|| static_selector(STATUS_SELECTOR));

/// "TEAM 123/4 ..."
static TEAM_AND_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+\s+\d+/\d+.*$").expect("valid regex"));
/// "123/4 ..."
static BARE_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+/\d+.*$").expect("valid regex"));
/// "... 123/4 (20.0 ov) ..."
static SCORE_ANYWHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+/\d+\s*(\(.*\))?").expect("valid regex"));

/// The cascade stage that produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreStrategy {
    /// Score panel whose text reads "TEAM RUNS/WICKETS"
    Primary,
    /// Team name paired with the score panel at the same index
    Paired,
    /// Compact score spans inside the header row
    Secondary,
    /// Any element with "score" in its class
    Broad,
    /// Match status line, e.g. "Stumps - Day 1"
    Status,
}

impl fmt::Display for ScoreStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScoreStrategy::Primary => "primary",
            ScoreStrategy::Paired => "paired",
            ScoreStrategy::Secondary => "secondary",
            ScoreStrategy::Broad => "broad",
            ScoreStrategy::Status => "status",
        };
        f.write_str(name)
    }
}

type Strategy = fn(&RawDocument) -> Option<String>;

const CASCADE: [(ScoreStrategy, Strategy); 5] = [
    (ScoreStrategy::Primary, primary),
    (ScoreStrategy::Paired, paired),
    (ScoreStrategy::Secondary, secondary),
    (ScoreStrategy::Broad, broad),
    (ScoreStrategy::Status, status),
];

/// Extracts the score or status line of a match page.
///
/// Always returns something displayable; [`SCORE_NOT_AVAILABLE`] when nothing matched
/// or when `page_url` is empty.
pub fn extract_score(html: &str, page_url: &str) -> String {
    match extract_score_with_strategy(html, page_url) {
        Some((_, score)) => score,
        None => SCORE_NOT_AVAILABLE.to_string(),
    }
}

/// Runs the cascade and reports which strategy produced the score
pub fn extract_score_with_strategy(html: &str, page_url: &str) -> Option<(ScoreStrategy, String)> {
    if page_url.trim().is_empty() {
        ::log::error!("Match URL is empty, not parsing");
        return None;
    }

    let doc = RawDocument::parse(html, page_url);
    for (strategy, run) in CASCADE {
        if let Some(score) = run(&doc) {
            ::log::debug!("Found score with {} strategy: {}", strategy, score);
            return Some((strategy, score));
        }
        ::log::trace!("Strategy {} found nothing", strategy);
    }

    ::log::debug!("No suitable score or status elements found for {}", page_url);
    None
}

fn primary(doc: &RawDocument) -> Option<String> {
    let panel = doc.select_first(&SCORE_PANEL)?;
    let text = element_text(&panel);
    ::log::debug!("Score panel text: {}", text);

    TEAM_AND_SCORE.is_match(&text).then_some(text)
}

fn paired(doc: &RawDocument) -> Option<String> {
    let names = doc.select_all(&TEAM_NAME);
    let scores = doc.select_all(&SCORE_PANEL);
    ::log::trace!("{} team names, {} score panels", names.len(), scores.len());

    for (name, score_el) in names.iter().zip(scores.iter()) {
        let name = element_text(name);
        let score = element_text(score_el);
        if name.is_empty() || !BARE_SCORE.is_match(&score) {
            continue;
        }

        let mut combined = format!("{} {}", name, score);
        if let Some(overs) = score_el
            .next_siblings()
            .find_map(scraper::ElementRef::wrap)
        {
            let overs = element_text(&overs);
            if overs.contains("overs") {
                combined.push_str(&format!(" ({})", overs));
            }
        }
        return Some(combined);
    }

    None
}

fn secondary(doc: &RawDocument) -> Option<String> {
    doc.select_all(&SECONDARY)
        .iter()
        .map(element_text)
        .inspect(|text| ::log::debug!("Checking potential score: {}", text))
        .find(|text| TEAM_AND_SCORE.is_match(text) || BARE_SCORE.is_match(text))
}

fn broad(doc: &RawDocument) -> Option<String> {
    let text = doc
        .select_all(&BROAD)
        .iter()
        .map(element_text)
        .find(|text| SCORE_ANYWHERE.is_match(text))?;

    // Kept whole: there is no reliable way to cut a summary down to the score line.
    let chars = text.chars().count();
    if chars > LONG_SCORE_CHARS {
        ::log::debug!("Broad score match is long ({} chars), using it as is", chars);
    }
    Some(text)
}

fn status(doc: &RawDocument) -> Option<String> {
    let text = element_text(&doc.select_first(&STATUS)?);
    (!text.is_empty()).then_some(text)
}
