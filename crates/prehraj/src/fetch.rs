use std::time::Duration;

use ezstream_search::SourceError;
use tracing::debug;

pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
// Rendering a page in a browser takes longer than a plain GET.
const RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// How raw page HTML is obtained.
pub enum PageFetcher {
    /// Plain GET with a desktop browser User-Agent.
    Http { client: reqwest::Client },
    /// Fully rendered HTML from a Browserless `/content` endpoint. The endpoint
    /// backs a single browser, so callers should not fetch through it concurrently.
    Browserless {
        client: reqwest::Client,
        base_url: String,
        token: Option<String>,
    },
}

fn network(e: reqwest::Error) -> SourceError {
    SourceError::Network(e.to_string())
}

impl PageFetcher {
    pub fn http() -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(network)?;
        Ok(Self::Http { client })
    }

    pub fn browserless(base_url: &str, token: Option<&str>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(RENDER_TIMEOUT)
            .build()
            .map_err(network)?;
        Ok(Self::Browserless {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()).map(String::from),
        })
    }

    /// True when the fetcher is one shared session that must not be used concurrently.
    pub fn is_shared_session(&self) -> bool {
        matches!(self, Self::Browserless { .. })
    }

    pub async fn fetch(&self, url: &str) -> Result<String, SourceError> {
        let resp = match self {
            Self::Http { client } => {
                debug!(url, fetcher = "http", "fetching page");
                client.get(url).send().await.map_err(network)?
            }
            Self::Browserless {
                client,
                base_url,
                token,
            } => {
                debug!(url, fetcher = "browserless", "rendering page");
                let mut endpoint = format!("{base_url}/content");
                if let Some(token) = token {
                    endpoint.push_str(&format!("?token={token}"));
                }
                client
                    .post(&endpoint)
                    .json(&serde_json::json!({ "url": url }))
                    .send()
                    .await
                    .map_err(network)?
            }
        };

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }
        resp.text().await.map_err(network)
    }
}
