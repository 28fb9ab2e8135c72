use std::sync::Arc;

use anyhow::Context;
use ezstream_metadata::tmdb::TmdbClient;
use ezstream_prehraj::{PageFetcher, PrehrajClient};
use ezstream_search::StreamPipeline;
use ezstream_server::config::ServerConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env; variables already set in the environment win
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    let config = ServerConfig::from_env();

    let api_key = config.tmdb_api_key.clone().unwrap_or_else(|| {
        warn!("TMDB_API_KEY not set; every stream request will come back empty");
        String::new()
    });
    let titles = TmdbClient::new(api_key).with_language(config.tmdb_language.clone());

    let fetcher = match &config.browserless_url {
        Some(url) => {
            info!(url = %url, "rendering search pages through browserless");
            PageFetcher::browserless(url, config.browserless_token.as_deref())
        }
        None => PageFetcher::http(),
    }
    .context("failed to build page fetcher")?;
    let upstream =
        Arc::new(PrehrajClient::new(fetcher).context("failed to build upstream client")?);

    if upstream.is_shared_session() && config.pipeline.search_concurrency > 1 {
        warn!(
            search_concurrency = config.pipeline.search_concurrency,
            "concurrent searches through one browser session may be blocked upstream"
        );
    }

    info!(
        search_concurrency = config.pipeline.search_concurrency,
        extract_concurrency = config.pipeline.extract_concurrency,
        max_candidates = config.pipeline.max_candidates,
        "pipeline configured"
    );
    let pipeline = StreamPipeline::new(upstream.clone(), upstream, config.pipeline.clone());

    let app_state = ezstream_server::state::AppState {
        titles: Arc::new(titles),
        pipeline: Arc::new(pipeline),
    };

    let app = ezstream_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind, "add-on listening at /manifest.json");

    axum::serve(listener, app).await?;
    Ok(())
}
