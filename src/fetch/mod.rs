//! Page retrieval.
//!
//! Extraction only needs the markup of a page; how it is obtained is behind
//! [`Fetcher`] so the plain HTTP client and the WebDriver session can be swapped
//! by configuration.

pub mod http;
pub mod webdriver;

use crate::config::{FetchBackend, FetchConfig};
use async_trait::async_trait;
use std::sync::Arc;

/// Errors that can occur while fetching a page
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("unexpected status {0}")]
    Status(u16),

    /// The request did not complete in time
    #[error("timed out: {0}")]
    Timeout(String),

    /// WebDriver session or navigation failure
    #[error("WebDriver error: {0}")]
    WebDriver(String),

    /// The URL to fetch is empty or malformed
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Retrieves the markup of a page
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the body of `url` as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// Release any held sessions
    async fn shutdown(&self) {}
}

/// Builds the fetcher selected by the configuration
pub fn from_config(config: &FetchConfig) -> Result<Arc<dyn Fetcher>, FetchError> {
    match config.backend {
        FetchBackend::Http => Ok(Arc::new(http::HttpFetcher::new(config)?)),
        FetchBackend::WebDriver => Ok(Arc::new(webdriver::WebDriverFetcher::new(config))),
    }
}

/// Rejects URLs that cannot be requested before any I/O happens
pub(crate) fn validate_url(url: &str) -> Result<url::Url, FetchError> {
    if url.trim().is_empty() {
        return Err(FetchError::InvalidUrl("empty URL".to_string()));
    }
    url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://www.espncricinfo.com/live-cricket-score").is_ok());
        assert!(matches!(validate_url(""), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(
            validate_url("/relative/path"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(FetchError::Status(503).to_string(), "unexpected status 503");
        assert_eq!(
            FetchError::Timeout("after 15s".into()).to_string(),
            "timed out: after 15s"
        );
    }

    #[test]
    fn test_from_config_builds_both_backends() {
        let mut config = FetchConfig::default();
        assert!(from_config(&config).is_ok());

        config.backend = FetchBackend::WebDriver;
        assert!(from_config(&config).is_ok());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FetchError>();
    }
}
