use crate::config::FeedSourceConfig;
use crate::fetch::Fetcher;
use crate::parsers::feed::extract_titles;
use crate::results::MatchSummary;
use crate::sources::MatchSource;
use async_trait::async_trait;
use std::sync::Arc;

/// Discovers matches from the item titles of an RSS feed.
///
/// Titles are taken as-is; the feed carries no match page URLs worth following,
/// so every summary is title-only.
pub struct FeedSource {
    feed_url: String,
    fetcher: Arc<dyn Fetcher>,
}

impl FeedSource {
    pub fn new(config: &FeedSourceConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            feed_url: config.feed_url.clone(),
            fetcher,
        }
    }
}

#[async_trait]
impl MatchSource for FeedSource {
    fn name(&self) -> &'static str {
        "feed"
    }

    async fn discover(&self) -> Vec<MatchSummary> {
        let xml = match self.fetcher.fetch(&self.feed_url).await {
            Ok(xml) => xml,
            Err(e) => {
                ::log::error!("Error fetching feed {}: {}", self.feed_url, e);
                return Vec::new();
            }
        };

        match extract_titles(&xml) {
            Ok(titles) => titles.into_iter().map(MatchSummary::title_only).collect(),
            Err(e) => {
                ::log::error!("Error parsing feed {}: {}", self.feed_url, e);
                Vec::new()
            }
        }
    }
}
