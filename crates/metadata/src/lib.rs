pub mod provider;
pub mod tmdb;

use ezstream_core::types::TitleContext;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
}

/// The title facts the stream search needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TitleDetails {
    pub name: String,
    pub original_name: String,
    pub year: Option<i32>,
}

impl TitleDetails {
    /// Search context for the whole title, or for one episode of it.
    pub fn to_context(&self, episode: Option<(u32, u32)>) -> TitleContext {
        let ctx = TitleContext::movie(
            self.name.clone(),
            self.original_name.clone(),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
        );
        match episode {
            Some((season, episode)) => ctx.with_episode(season, episode),
            None => ctx,
        }
    }
}
