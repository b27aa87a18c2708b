pub mod feed;
pub mod listing;

use crate::config::{ConfigError, SourceConfig};
use crate::fetch::Fetcher;
use crate::results::MatchSummary;
use async_trait::async_trait;
use std::sync::Arc;

/// A place live matches can be discovered from
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Discover the current live matches.
    ///
    /// Failures are logged and yield an empty list.
    async fn discover(&self) -> Vec<MatchSummary>;
}

/// Builds the source selected by the configuration
pub fn from_config(
    config: &SourceConfig,
    fetcher: Arc<dyn Fetcher>,
) -> Result<Box<dyn MatchSource>, ConfigError> {
    match config {
        SourceConfig::Html(cfg) => Ok(Box::new(listing::ListingSource::new(cfg, fetcher)?)),
        SourceConfig::Feed(cfg) => Ok(Box::new(feed::FeedSource::new(cfg, fetcher))),
    }
}
