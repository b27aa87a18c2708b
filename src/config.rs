use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Errors raised while loading configuration or compiling its patterns
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// Configuration for discovering matches from an HTML listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlSourceConfig {
    /// Page listing the live matches
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Base URL used to resolve relative match links
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Substring every match page URL contains
    #[serde(default = "default_match_path_marker")]
    pub match_path_marker: String,
}

/// Configuration for discovering matches from an RSS feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSourceConfig {
    /// URL of the feed
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
}

/// Enum containing all match source configuration types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SourceConfig {
    /// Heuristic extraction from the live scores page
    Html(HtmlSourceConfig),

    /// Titles read from a structured feed
    Feed(FeedSourceConfig),
}

/// How pages are retrieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchBackend {
    /// Plain HTTP GET
    Http,
    /// Rendered page source from a WebDriver session
    WebDriver,
}

/// Configuration for page retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_backend")]
    pub backend: FetchBackend,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Upper bound on reading a whole response
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreboardConfig {
    #[serde(default = "default_source")]
    pub source: SourceConfig,

    #[serde(default)]
    pub fetch: FetchConfig,
}

impl ScoreboardConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            webdriver_url: default_webdriver_url(),
        }
    }
}

impl Default for HtmlSourceConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            base_url: default_base_url(),
            match_path_marker: default_match_path_marker(),
        }
    }
}

impl HtmlSourceConfig {
    /// Create a new configuration for the given listing page
    pub fn new(listing_url: &str) -> Self {
        let mut config = Self::default();
        config.set_listing_url(listing_url);
        config
    }

    /// Point at another listing page.
    ///
    /// Relative match links resolve against the listing page's origin, so
    /// `base_url` follows it. An unparsable URL leaves `base_url` unchanged.
    pub fn set_listing_url(&mut self, listing_url: &str) {
        self.listing_url = listing_url.to_string();
        match url::Url::parse(listing_url).map(|url| url.origin()) {
            Ok(origin) if origin.is_tuple() => self.base_url = origin.ascii_serialization(),
            _ => ::log::warn!(
                "Keeping base URL {} for listing URL {}",
                self.base_url,
                listing_url
            ),
        }
    }
}

impl Default for FeedSourceConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
        }
    }
}

impl FeedSourceConfig {
    /// Create a new configuration for the given feed
    pub fn new(feed_url: &str) -> Self {
        Self {
            feed_url: feed_url.to_string(),
        }
    }
}

fn default_source() -> SourceConfig {
    SourceConfig::Html(HtmlSourceConfig::default())
}

fn default_base_url() -> String {
    "https://www.espncricinfo.com".to_string()
}

fn default_listing_url() -> String {
    format!("{}/live-cricket-score", default_base_url())
}

fn default_match_path_marker() -> String {
    "/live-cricket-scores/".to_string()
}

fn default_feed_url() -> String {
    "https://static.cricinfo.com/rss/livescores.xml".to_string()
}

fn default_backend() -> FetchBackend {
    FetchBackend::Http
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_read_timeout_secs() -> u64 {
    15
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}
