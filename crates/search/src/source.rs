use ezstream_core::types::{Candidate, StreamDescriptor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("no sources found in page")]
    NoSources,
    #[error("parse error: {0}")]
    Parse(String),
}

/// Runs one textual query against the upstream catalog.
///
/// Implementations must return absolute candidate addresses. A source backed by a
/// single stateful session is not safe for concurrent use; run it with a search
/// concurrency of 1.
#[async_trait::async_trait]
pub trait SearchSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, SourceError>;
}

/// Fetches a candidate's details page and extracts its playable streams.
#[async_trait::async_trait]
pub trait DetailsSource: Send + Sync {
    /// Returns `SourceError::NoSources` when the page yields nothing playable.
    async fn fetch_details(&self, address: &str) -> Result<Vec<StreamDescriptor>, SourceError>;
}
