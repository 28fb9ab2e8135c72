//! prehraj.to client: full-text search and details-page stream extraction.

use ezstream_core::types::{Candidate, StreamDescriptor};
use ezstream_search::extract::extract_streams;
use ezstream_search::{DetailsSource, SearchSource, SourceError};
use tracing::debug;
use url::Url;

use crate::fetch::PageFetcher;
use crate::search::parse_search_results;

pub const BASE_URL: &str = "https://prehraj.to";

pub struct PrehrajClient {
    base: Url,
    /// Fetches search pages; may be a rendering browser.
    search_fetcher: PageFetcher,
    /// Details pages embed their sources statically and are always fetched over plain HTTP.
    details_fetcher: PageFetcher,
}

impl PrehrajClient {
    pub fn new(search_fetcher: PageFetcher) -> Result<Self, SourceError> {
        Self::with_base_url(search_fetcher, BASE_URL)
    }

    pub fn with_base_url(search_fetcher: PageFetcher, base_url: &str) -> Result<Self, SourceError> {
        let base = Url::parse(base_url)
            .map_err(|e| SourceError::Parse(format!("base url {base_url}: {e}")))?;
        Ok(Self {
            base,
            search_fetcher,
            details_fetcher: PageFetcher::http()?,
        })
    }

    /// True when searches go through a shared browser session.
    pub fn is_shared_session(&self) -> bool {
        self.search_fetcher.is_shared_session()
    }

    /// `https://prehraj.to/hledej/<query>` with the query escaped as one path segment.
    pub fn search_url(&self, query: &str) -> Result<Url, SourceError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::Parse(format!("base url {} cannot hold a path", self.base)))?
            .clear()
            .push("hledej")
            .push(query);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl SearchSource for PrehrajClient {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, SourceError> {
        let url = self.search_url(query)?;
        let html = self.search_fetcher.fetch(url.as_str()).await?;
        let results = parse_search_results(&html, &self.base);
        debug!(query, count = results.len(), "search page parsed");
        Ok(results)
    }
}

#[async_trait::async_trait]
impl DetailsSource for PrehrajClient {
    async fn fetch_details(&self, address: &str) -> Result<Vec<StreamDescriptor>, SourceError> {
        let html = self.details_fetcher.fetch(address).await?;
        let streams = extract_streams(&html)?;
        debug!(address, count = streams.len(), "details page parsed");
        Ok(streams)
    }
}
