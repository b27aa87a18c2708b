use crate::fetch::Fetcher;
use crate::parsers::score::extract_score;
use crate::results::{MatchSummary, SCORE_NOT_AVAILABLE};
use crate::sources::MatchSource;
use std::sync::Arc;

/// Sequences fetch, parse and extract for the listing and per-match flows.
///
/// Nothing here fails: transport and parse problems are logged and turn into an
/// empty listing or [`SCORE_NOT_AVAILABLE`].
pub struct Orchestrator {
    source: Box<dyn MatchSource>,
    fetcher: Arc<dyn Fetcher>,
}

impl Orchestrator {
    pub fn new(source: Box<dyn MatchSource>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { source, fetcher }
    }

    /// Name of the configured source
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Current live matches, without scores
    pub async fn live_matches(&self) -> Vec<MatchSummary> {
        let matches = self.source.discover().await;
        ::log::info!(
            "Discovered {} live matches from {} source",
            matches.len(),
            self.source.name()
        );
        matches
    }

    /// Titles of the current live matches
    pub async fn titles(&self) -> Vec<String> {
        self.live_matches()
            .await
            .into_iter()
            .map(|m| m.title)
            .collect()
    }

    /// Fetches a match page and extracts its score or status line
    pub async fn live_score(&self, match_url: &str) -> String {
        if match_url.trim().is_empty() {
            ::log::error!("Match URL is empty");
            return SCORE_NOT_AVAILABLE.to_string();
        }

        match self.fetcher.fetch(match_url).await {
            Ok(html) => {
                let score = extract_score(&html, match_url);
                ::log::debug!("Score for {}: {}", match_url, score);
                score
            }
            Err(e) => {
                ::log::error!("Error fetching score for {}: {}", match_url, e);
                SCORE_NOT_AVAILABLE.to_string()
            }
        }
    }

    /// Returns the summary with its score attached
    pub async fn score_match(&self, summary: &MatchSummary) -> MatchSummary {
        let score = self.live_score(&summary.url).await;
        summary.with_score(score)
    }

    /// Discovers the live matches and scores each one in turn
    pub async fn refresh(&self) -> Vec<MatchSummary> {
        let matches = self.live_matches().await;
        let mut scored = Vec::with_capacity(matches.len());
        for summary in &matches {
            scored.push(self.score_match(summary).await);
        }
        scored
    }

    /// Releases fetcher resources such as WebDriver sessions
    pub async fn shutdown(&self) {
        self.fetcher.shutdown().await;
    }
}
