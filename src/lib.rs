// Re-export modules
pub mod config;
pub mod fetch;
pub mod filter;
pub mod orchestrator;
pub mod parsers;
pub mod results;
pub mod session;
pub mod sources;
pub mod utils;

// Re-export commonly used types for convenience
pub use orchestrator::Orchestrator;
pub use parsers::listing::extract_matches;
pub use parsers::score::extract_score;
pub use results::{MatchSummary, SCORE_NOT_AVAILABLE};

use config::{FeedSourceConfig, FetchBackend, HtmlSourceConfig, ScoreboardConfig, SourceConfig};
use parsers::ParserType;

/// Where live matches are discovered
#[derive(Debug, Clone)]
pub enum SourceType {
    /// Live scores HTML page
    Html(String),
    /// RSS feed
    Feed(String),
}

impl SourceType {
    /// Picks the source kind from the shape of the URL
    pub fn from_url(url: &str) -> Self {
        match ParserType::from_url(url) {
            ParserType::Html => SourceType::Html(url.to_string()),
            ParserType::Feed => SourceType::Feed(url.to_string()),
        }
    }
}

/// Main builder for an [`Orchestrator`]
pub struct Scoreboard {
    config: ScoreboardConfig,
}

impl Scoreboard {
    /// Create a new builder for the given source, with default fetch settings
    pub fn new(source: SourceType) -> Self {
        let source = match source {
            SourceType::Html(url) => SourceConfig::Html(HtmlSourceConfig::new(&url)),
            SourceType::Feed(url) => SourceConfig::Feed(FeedSourceConfig::new(&url)),
        };
        Self {
            config: ScoreboardConfig {
                source,
                ..ScoreboardConfig::default()
            },
        }
    }

    /// Start from a full configuration
    pub fn from_config(config: ScoreboardConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a file
    pub fn with_config_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::from_config(ScoreboardConfig::from_file(path)?))
    }

    /// Load configuration from a string
    pub fn with_config_str(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::from_config(ScoreboardConfig::from_json(config_str)?))
    }

    /// Replace the source, keeping the fetch settings
    pub fn with_source(mut self, source: SourceType) -> Self {
        let fetch = self.config.fetch.clone();
        self.config = Self::new(source).config;
        self.config.fetch = fetch;
        self
    }

    /// Override the listing or feed URL of the configured source.
    ///
    /// For an HTML source the base URL moves to the new listing page's origin.
    pub fn with_source_url(mut self, url: &str) -> Self {
        match &mut self.config.source {
            SourceConfig::Html(cfg) => cfg.set_listing_url(url),
            SourceConfig::Feed(cfg) => cfg.feed_url = url.to_string(),
        }
        self
    }

    /// Set the fetch backend
    pub fn with_backend(mut self, backend: FetchBackend) -> Self {
        self.config.fetch.backend = backend;
        self
    }

    /// Set the read timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.fetch.read_timeout_secs = timeout_seconds;
        self
    }

    /// Set the WebDriver endpoint
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.fetch.webdriver_url = url.to_string();
        self
    }

    pub fn config(&self) -> &ScoreboardConfig {
        &self.config
    }

    /// Build the orchestrator for the configured source and backend
    pub fn build(self) -> Result<Orchestrator, Box<dyn std::error::Error>> {
        let fetcher = fetch::from_config(&self.config.fetch)?;
        let source = sources::from_config(&self.config.source, fetcher.clone())?;
        ::log::debug!("Using {} source", source.name());
        Ok(Orchestrator::new(source, fetcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let board = Scoreboard::new(SourceType::Html("https://example.com/live".to_string()))
            .with_timeout(3)
            .with_backend(FetchBackend::WebDriver)
            .with_webdriver_url("http://localhost:9515");

        let config = board.config();
        assert_eq!(config.fetch.read_timeout_secs, 3);
        assert_eq!(config.fetch.backend, FetchBackend::WebDriver);
        assert_eq!(config.fetch.webdriver_url, "http://localhost:9515");
        match &config.source {
            SourceConfig::Html(cfg) => {
                assert_eq!(cfg.listing_url, "https://example.com/live");
                assert_eq!(cfg.base_url, "https://example.com");
            }
            SourceConfig::Feed(_) => panic!("expected Html source"),
        }
    }

    #[test]
    fn test_with_source_keeps_fetch_settings() {
        let board = Scoreboard::new(SourceType::Html("https://example.com/live".to_string()))
            .with_timeout(7)
            .with_source(SourceType::Feed("https://example.com/rss.xml".to_string()))
            .with_source_url("https://example.com/other.xml");

        assert_eq!(board.config().fetch.read_timeout_secs, 7);
        match &board.config().source {
            SourceConfig::Feed(cfg) => assert_eq!(cfg.feed_url, "https://example.com/other.xml"),
            SourceConfig::Html(_) => panic!("expected Feed source"),
        }
    }

    #[test]
    fn test_source_url_override_moves_base_url() {
        let board = Scoreboard::from_config(ScoreboardConfig::default())
            .with_source_url("http://localhost:8000/live-cricket-score");

        match &board.config().source {
            SourceConfig::Html(cfg) => {
                assert_eq!(cfg.listing_url, "http://localhost:8000/live-cricket-score");
                assert_eq!(cfg.base_url, "http://localhost:8000");
            }
            SourceConfig::Feed(_) => panic!("expected Html source"),
        }
    }

    #[test]
    fn test_source_type_from_url() {
        assert!(matches!(
            SourceType::from_url("https://static.cricinfo.com/rss/livescores.xml"),
            SourceType::Feed(url) if url == "https://static.cricinfo.com/rss/livescores.xml"
        ));
        assert!(matches!(
            SourceType::from_url("https://www.espncricinfo.com/live-cricket-score"),
            SourceType::Html(_)
        ));
    }

    #[test]
    fn test_build_selects_source() {
        let html = Scoreboard::new(SourceType::Html("https://example.com/live".to_string()))
            .build()
            .unwrap();
        assert_eq!(html.source_name(), "html");

        let feed = Scoreboard::with_config_str(r#"{ "source": { "type": "Feed" } }"#)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(feed.source_name(), "feed");
    }
}
