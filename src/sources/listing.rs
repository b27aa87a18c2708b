use crate::config::{ConfigError, HtmlSourceConfig};
use crate::fetch::Fetcher;
use crate::parsers::listing::ListingExtractor;
use crate::results::MatchSummary;
use crate::sources::MatchSource;
use async_trait::async_trait;
use std::sync::Arc;

/// Discovers matches by mining the live scores HTML page
pub struct ListingSource {
    listing_url: String,
    base_url: String,
    extractor: ListingExtractor,
    fetcher: Arc<dyn Fetcher>,
}

impl ListingSource {
    pub fn new(config: &HtmlSourceConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self, ConfigError> {
        Ok(Self {
            listing_url: config.listing_url.clone(),
            base_url: config.base_url.clone(),
            extractor: ListingExtractor::new(config)?,
            fetcher,
        })
    }
}

#[async_trait]
impl MatchSource for ListingSource {
    fn name(&self) -> &'static str {
        "html"
    }

    async fn discover(&self) -> Vec<MatchSummary> {
        ::log::debug!("Fetching live matches from {}", self.listing_url);

        let html = match self.fetcher.fetch(&self.listing_url).await {
            Ok(html) => html,
            Err(e) => {
                ::log::error!("Error fetching live matches from {}: {}", self.listing_url, e);
                return Vec::new();
            }
        };

        self.extractor.extract(&html, &self.base_url)
    }
}
