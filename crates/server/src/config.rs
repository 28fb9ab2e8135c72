use ezstream_metadata::tmdb::DEFAULT_LANGUAGE;
use ezstream_search::PipelineConfig;

const DEFAULT_PORT: &str = "8080";
// A plain HTTP fetcher tolerates a few parallel searches; a browser session does not.
const HTTP_SEARCH_CONCURRENCY: usize = 3;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub tmdb_api_key: Option<String>,
    pub tmdb_language: String,
    pub browserless_url: Option<String>,
    pub browserless_token: Option<String>,
    pub pipeline: PipelineConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let number = |key: &str| var(key).and_then(|v| v.trim().parse::<usize>().ok());

        let bind = var("EZSTREAM_BIND").unwrap_or_else(|| {
            let port = var("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
            format!("0.0.0.0:{port}")
        });

        let browserless_url = var("EZSTREAM_BROWSERLESS_URL");
        let defaults = PipelineConfig::default();
        let search_default = if browserless_url.is_some() {
            defaults.search_concurrency
        } else {
            HTTP_SEARCH_CONCURRENCY
        };

        Self {
            bind,
            tmdb_api_key: var("TMDB_API_KEY"),
            tmdb_language: var("EZSTREAM_TMDB_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            browserless_url,
            browserless_token: var("EZSTREAM_BROWSERLESS_TOKEN"),
            pipeline: PipelineConfig {
                search_concurrency: number("EZSTREAM_SEARCH_CONCURRENCY")
                    .unwrap_or(search_default),
                extract_concurrency: number("EZSTREAM_EXTRACT_CONCURRENCY")
                    .unwrap_or(defaults.extract_concurrency),
                max_candidates: number("EZSTREAM_MAX_CANDIDATES")
                    .unwrap_or(defaults.max_candidates),
            },
        }
    }
}
