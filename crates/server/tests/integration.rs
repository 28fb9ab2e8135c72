use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use ezstream_core::types::{Candidate, MediaKind, StreamDescriptor};
use ezstream_metadata::provider::TitleLookup;
use ezstream_metadata::{MetadataError, TitleDetails};
use ezstream_search::{DetailsSource, PipelineConfig, SearchSource, SourceError, StreamPipeline};
use ezstream_server::routes::build_router;
use ezstream_server::state::AppState;
use serde_json::Value;

/// Titles keyed by `<kind>/<tmdb id>`.
struct StubTitles(HashMap<String, TitleDetails>);

#[async_trait::async_trait]
impl TitleLookup for StubTitles {
    fn name(&self) -> &str {
        "stub"
    }

    async fn lookup(
        &self,
        kind: MediaKind,
        provider_id: &str,
    ) -> Result<TitleDetails, MetadataError> {
        self.0
            .get(&format!("{kind}/{provider_id}"))
            .cloned()
            .ok_or(MetadataError::NotFound)
    }
}

/// Upstream site double: every query mentioning a known title returns its hits.
struct StubUpstream {
    hits: Vec<(&'static str, Vec<Candidate>)>,
    pages: HashMap<String, Vec<StreamDescriptor>>,
    queries: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl SearchSource for StubUpstream {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, SourceError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self
            .hits
            .iter()
            .filter(|(needle, _)| query.contains(needle))
            .flat_map(|(_, hits)| hits.clone())
            .collect())
    }
}

#[async_trait::async_trait]
impl DetailsSource for StubUpstream {
    async fn fetch_details(&self, address: &str) -> Result<Vec<StreamDescriptor>, SourceError> {
        self.pages.get(address).cloned().ok_or(SourceError::NoSources)
    }
}

fn hit(title: &str, slug: &str, size: &str) -> Candidate {
    Candidate {
        title: title.into(),
        duration: "2:40:12".into(),
        size: size.into(),
        address: format!("https://prehraj.to/{slug}"),
    }
}

fn stream(label: &str, hint: &str, file: &str) -> StreamDescriptor {
    StreamDescriptor {
        label: label.into(),
        source_resolution: Some(hint.into()),
        address: format!("https://cdn.test/{file}"),
    }
}

fn upstream() -> Arc<StubUpstream> {
    let mut pages = HashMap::new();
    pages.insert(
        "https://prehraj.to/wicked-cz/1".to_string(),
        vec![
            stream("720p", "1920 x 1080 px", "cz-720.mp4"),
            stream("1080p", "1920 x 1080 px", "cz-1080.mp4"),
        ],
    );
    pages.insert(
        "https://prehraj.to/wicked-4k/2".to_string(),
        vec![stream("720p", "3840 x 2160 px", "4k-720.mp4")],
    );
    pages.insert(
        "https://prehraj.to/temny-s02e05/9".to_string(),
        vec![stream("1080p", "1920 x 1080 px", "dark-s02e05.mp4")],
    );

    Arc::new(StubUpstream {
        hits: vec![
            (
                "Wicked",
                vec![
                    hit("Wicked 2024 CZ dabing", "wicked-cz/1", "6.1 GB"),
                    hit("Wicked 2024 4K", "wicked-4k/2", "850 MB"),
                    hit("Wicked 1998 muzikál", "wicked-old/3", "1.2 GB"),
                    hit("Wicked 2024 trailer", "wicked-trailer/4", "20 MB"),
                ],
            ),
            (
                "S02E05",
                vec![hit("Temný S02E05 2017 CZ", "temny-s02e05/9", "1.4 GB")],
            ),
        ],
        pages,
        queries: Mutex::new(Vec::new()),
    })
}

fn titles() -> Arc<StubTitles> {
    let mut titles = HashMap::new();
    titles.insert(
        "movie/402431".to_string(),
        TitleDetails {
            name: "Wicked".into(),
            original_name: "Wicked".into(),
            year: Some(2024),
        },
    );
    titles.insert(
        "series/70523".to_string(),
        TitleDetails {
            name: "Temný".into(),
            original_name: "Dark".into(),
            year: Some(2017),
        },
    );
    Arc::new(StubTitles(titles))
}

fn test_app(upstream: Arc<StubUpstream>) -> TestServer {
    let pipeline = StreamPipeline::new(upstream.clone(), upstream, PipelineConfig::default());
    let state = AppState {
        titles: titles(),
        pipeline: Arc::new(pipeline),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = test_app(upstream());
    let resp = server.get("/health").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn manifest_describes_the_addon() {
    let server = test_app(upstream());
    let resp = server.get("/manifest.json").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["id"], "org.ezstremio.addon");
    assert_eq!(body["name"], "ezStremio");
    assert_eq!(body["resources"], serde_json::json!(["stream"]));
    assert_eq!(body["idPrefixes"], serde_json::json!(["eztmdb:"]));
}

#[tokio::test]
async fn movie_streams_are_ranked() {
    let server = test_app(upstream());
    let resp = server.get("/stream/movie/eztmdb:402431.json").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    let streams = body["streams"].as_array().unwrap();

    // The 1998 upload is filtered by year; the trailer page has no sources.
    let urls: Vec<&str> = streams.iter().map(|s| s["url"].as_str().unwrap()).collect();
    assert_eq!(
        urls,
        vec![
            "https://cdn.test/4k-720.mp4",
            "https://cdn.test/cz-1080.mp4",
            "https://cdn.test/cz-720.mp4",
        ]
    );

    assert_eq!(streams[0]["name"], "Prehraj.to ⚡ 720p");
    assert_eq!(
        streams[0]["title"],
        "📂 Wicked 2024 4K\n💾 850 MB • ⏱️ 2:40:12\n⚙️ Source: 4K"
    );
    assert_eq!(streams[1]["name"], "Prehraj.to ⚡ 1080p");
}

#[tokio::test]
async fn episode_ids_search_for_the_episode() {
    let upstream = upstream();
    let server = test_app(upstream.clone());
    let resp = server.get("/stream/series/eztmdb:70523:2:5.json").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["streams"].as_array().unwrap().len(), 1);
    assert_eq!(body["streams"][0]["url"], "https://cdn.test/dark-s02e05.mp4");

    let queries = upstream.queries.lock().unwrap();
    assert!(queries.iter().all(|q| q.ends_with("S02E05")));
    assert!(queries.iter().any(|q| q == "Dark 2017 S02E05"));
}

#[tokio::test]
async fn foreign_ids_yield_no_streams() {
    let upstream = upstream();
    let server = test_app(upstream.clone());
    let resp = server.get("/stream/movie/tt1262426.json").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["streams"], serde_json::json!([]));
    assert!(upstream.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_titles_yield_no_streams() {
    let server = test_app(upstream());
    let resp = server.get("/stream/movie/eztmdb:1").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["streams"], serde_json::json!([]));
}

#[tokio::test]
async fn path_like_tmdb_ids_never_reach_the_pipeline() {
    let upstream = upstream();
    let server = test_app(upstream.clone());
    let resp = server.get("/stream/movie/eztmdb:..%2F..%2Fx.json").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["streams"], serde_json::json!([]));
    assert!(upstream.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unsupported_type_is_rejected() {
    let server = test_app(upstream());
    let resp = server.get("/stream/channel/eztmdb:402431.json").await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "bad_request");
    assert!(body["error"]["details"].is_object());
}

#[tokio::test]
async fn unknown_routes_use_the_error_envelope() {
    let server = test_app(upstream());
    let resp = server.get("/catalog/movie/top.json").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn responses_allow_any_origin() {
    let server = test_app(upstream());
    let resp = server
        .get("/manifest.json")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://web.stremio.com"),
        )
        .await;
    resp.assert_status_ok();
    let allow = resp.headers().get("access-control-allow-origin").unwrap();
    assert_eq!(allow, "*");
}
