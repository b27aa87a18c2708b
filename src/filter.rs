use regex::Regex;
use serde::{Deserialize, Serialize};

/// Configuration for accepting listing candidates as live matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchFilterConfig {
    /// Substring a match page URL must contain
    pub match_path_marker: String,

    /// Regex patterns a title may match to count as a match title
    #[serde(default = "default_title_patterns")]
    pub title_patterns: Vec<String>,

    /// Case-insensitive keywords a title may contain to count as a match title
    #[serde(default = "default_title_keywords")]
    pub title_keywords: Vec<String>,
}

fn default_title_patterns() -> Vec<String> {
    vec![r"(?i)^.* vs .*$".to_string()]
}

fn default_title_keywords() -> Vec<String> {
    vec!["match".to_string()]
}

impl Default for MatchFilterConfig {
    fn default() -> Self {
        Self {
            match_path_marker: "/live-cricket-scores/".to_string(),
            title_patterns: default_title_patterns(),
            title_keywords: default_title_keywords(),
        }
    }
}

/// Why a candidate was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingTitle,
    MissingUrl,
    NotAMatchUrl,
    NotAMatchTitle,
}

/// Filter that decides which (title, url) candidates are live matches
#[derive(Debug)]
pub struct MatchFilter {
    config: MatchFilterConfig,
    title_regexes: Vec<Regex>,
    keywords: Vec<String>,
}

impl Default for MatchFilter {
    fn default() -> Self {
        Self::new(MatchFilterConfig::default()).expect("Default title patterns should be valid")
    }
}

impl MatchFilter {
    /// Create a new match filter from configuration
    pub fn new(config: MatchFilterConfig) -> Result<Self, regex::Error> {
        let mut title_regexes = Vec::with_capacity(config.title_patterns.len());
        for pattern in &config.title_patterns {
            title_regexes.push(Regex::new(pattern)?);
        }

        let keywords = config
            .title_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();

        Ok(Self {
            config,
            title_regexes,
            keywords,
        })
    }

    /// Filter using the default title heuristics and a custom marker
    pub fn with_marker(marker: &str) -> Result<Self, regex::Error> {
        Self::new(MatchFilterConfig {
            match_path_marker: marker.to_string(),
            ..MatchFilterConfig::default()
        })
    }

    pub fn marker(&self) -> &str {
        &self.config.match_path_marker
    }

    /// Checks a candidate, returning the first rule it breaks
    pub fn check(&self, title: &str, url: &str) -> Result<(), Rejection> {
        if title.is_empty() {
            return Err(Rejection::MissingTitle);
        }
        if url.is_empty() {
            return Err(Rejection::MissingUrl);
        }
        if !self.is_match_url(url) {
            return Err(Rejection::NotAMatchUrl);
        }
        if !self.looks_like_match(title) {
            return Err(Rejection::NotAMatchTitle);
        }
        Ok(())
    }

    /// Determine if a candidate should be kept
    pub fn should_keep(&self, title: &str, url: &str) -> bool {
        self.check(title, url).is_ok()
    }

    /// Whether the URL points at an individual match page
    pub fn is_match_url(&self, url: &str) -> bool {
        url.contains(&self.config.match_path_marker)
    }

    /// Heuristic: " vs " anywhere or one of the keywords, ignoring case
    pub fn looks_like_match(&self, title: &str) -> bool {
        if self.title_regexes.iter().any(|re| re.is_match(title)) {
            return true;
        }

        let lowered = title.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATCH_URL: &str =
        "https://www.espncricinfo.com/live-cricket-scores/series-1/match-1-aus-vs-eng";

    #[test]
    fn test_default_filter() {
        let filter = MatchFilter::default();

        assert!(filter.should_keep("Australia vs England, 1st Test", MATCH_URL));
        assert!(filter.should_keep("India VS Pakistan", MATCH_URL));
        assert!(filter.should_keep("3rd Match, Group B", MATCH_URL));
        assert!(filter.should_keep("Warm-up MATCH", MATCH_URL));
    }

    #[test]
    fn test_rejections() {
        let filter = MatchFilter::default();

        assert_eq!(filter.check("", MATCH_URL), Err(Rejection::MissingTitle));
        assert_eq!(
            filter.check("Australia vs England", ""),
            Err(Rejection::MissingUrl)
        );
        assert_eq!(
            filter.check(
                "Australia vs England",
                "https://www.espncricinfo.com/live-cricket-news/some-page"
            ),
            Err(Rejection::NotAMatchUrl)
        );
        assert_eq!(
            filter.check("Some News Article", MATCH_URL),
            Err(Rejection::NotAMatchTitle)
        );
    }

    #[test]
    fn test_vs_needs_surrounding_spaces() {
        let filter = MatchFilter::default();
        assert!(!filter.looks_like_match("Canvas Prints"));
        assert!(!filter.looks_like_match("aus-vs-eng"));
    }

    #[test]
    fn test_custom_marker() {
        let filter = MatchFilter::with_marker("/game/").unwrap();
        assert_eq!(filter.marker(), "/game/");
        assert!(filter.should_keep("A vs B", "https://example.com/game/42"));
        assert!(!filter.should_keep("A vs B", MATCH_URL));
    }

    #[test]
    fn test_invalid_pattern() {
        let config = MatchFilterConfig {
            title_patterns: vec!["(unclosed".to_string()],
            ..MatchFilterConfig::default()
        };
        assert!(MatchFilter::new(config).is_err());
    }
}
