//! TMDB (The Movie Database) provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use ezstream_core::types::MediaKind;
use tracing::debug;

use crate::provider::TitleLookup;
use crate::{MetadataError, TitleDetails};

const BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "cs-CZ";

pub struct TmdbClient {
    api_key: String,
    language: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            language: DEFAULT_LANGUAGE.to_string(),
            base_url: BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Localize titles, e.g. `sk-SK`.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];
        all_params.extend_from_slice(params);

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl TitleLookup for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn lookup(
        &self,
        kind: MediaKind,
        provider_id: &str,
    ) -> Result<TitleDetails, MetadataError> {
        if self.api_key.is_empty() {
            return Err(MetadataError::Provider("TMDB API key missing".into()));
        }

        let data = match kind {
            MediaKind::Movie => self.get_json(&format!("/movie/{provider_id}"), &[]).await?,
            MediaKind::Series => self.get_json(&format!("/tv/{provider_id}"), &[]).await?,
        };

        Ok(match kind {
            MediaKind::Movie => parse_movie_title(&data),
            MediaKind::Series => parse_series_title(&data),
        })
    }
}

fn year_of(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| d.get(..4)).and_then(|y| y.parse().ok())
}

fn parse_movie_title(data: &serde_json::Value) -> TitleDetails {
    TitleDetails {
        name: data["title"].as_str().unwrap_or_default().to_string(),
        original_name: data["original_title"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        year: year_of(data["release_date"].as_str()),
    }
}

fn parse_series_title(data: &serde_json::Value) -> TitleDetails {
    TitleDetails {
        name: data["name"].as_str().unwrap_or_default().to_string(),
        original_name: data["original_name"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        year: year_of(data["first_air_date"].as_str()),
    }
}
