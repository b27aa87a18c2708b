use serde::{Deserialize, Serialize};

/// Returned when no extraction strategy produces a score
pub const SCORE_NOT_AVAILABLE: &str = "Score not available";

/// A live match discovered on a listing page or feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Display title, e.g. "Australia vs England, 1st Test"
    pub title: String,

    /// Absolute URL of the match page (empty for feed entries)
    pub url: String,

    /// Score or status line, once fetched
    pub score: Option<String>,
}

impl MatchSummary {
    /// Create a summary without a score
    pub fn new(title: String, url: String) -> Self {
        Self {
            title,
            url,
            score: None,
        }
    }

    /// Create a summary for a source that only provides titles
    pub fn title_only(title: String) -> Self {
        Self::new(title, String::new())
    }

    /// Returns a copy of this summary with the score attached
    pub fn with_score(&self, score: String) -> Self {
        Self {
            title: self.title.clone(),
            url: self.url.clone(),
            score: Some(score),
        }
    }

    /// Whether this summary points at a match page
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}
