use axum::Router;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use ezstream_prehraj::{PageFetcher, PrehrajClient};
use ezstream_search::{DetailsSource, SearchSource, SourceError};

async fn search_page(Path(query): Path<String>) -> Html<String> {
    if query != "Wicked 2024" {
        return Html("<html><head><title>Nic</title></head><body></body></html>".into());
    }
    Html(
        r#"<html><body>
<a class="video video--link" href="/wicked-cz/1"><div>6.1 GB</div><div>2:40:12</div><h3>Wicked 2024 CZ</h3></a>
<a class="video video--link" href="/wicked-en/2"><div>850 MB</div><div>2:40:12</div><h3>Wicked 2024 EN</h3></a>
</body></html>"#
            .into(),
    )
}

async fn details_page(Path((slug, _id)): Path<(String, String)>) -> Result<Html<&'static str>, StatusCode> {
    match slug.as_str() {
        "wicked-cz" => Ok(Html(
            r#"<ul><li><span>Rozlišení:</span><span>1920 x 1080 px</span></li></ul>
<script>var sources = [{file: "https://cdn.test/cz-1080.mp4", label: "1080p"}, {file: "https://cdn.test/cz-720.mp4", label: "720p"}];</script>"#,
        )),
        "wicked-en" => Ok(Html("<script>var player = null;</script>")),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn upstream() -> String {
    let app = Router::new()
        .route("/hledej/{query}", get(search_page))
        .route("/{slug}/{id}", get(details_page));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn client() -> PrehrajClient {
    let base = upstream().await;
    PrehrajClient::with_base_url(PageFetcher::http().unwrap(), &base).unwrap()
}

#[tokio::test]
async fn search_resolves_links_against_base() {
    let client = client().await;
    let results = client.search("Wicked 2024").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Wicked 2024 CZ");
    assert_eq!(results[0].size, "6.1 GB");
    assert!(results[0].address.starts_with("http://127.0.0.1:"));
    assert!(results[0].address.ends_with("/wicked-cz/1"));
}

#[tokio::test]
async fn search_without_hits_is_empty_not_an_error() {
    let client = client().await;
    assert!(client.search("Nothing here").await.unwrap().is_empty());
}

#[tokio::test]
async fn details_extracts_streams() {
    let client = client().await;
    let hits = client.search("Wicked 2024").await.unwrap();
    let streams = client.fetch_details(&hits[0].address).await.unwrap();

    assert_eq!(streams.len(), 2);
    assert_eq!(streams[0].label, "1080p");
    assert_eq!(streams[0].address, "https://cdn.test/cz-1080.mp4");
    assert_eq!(streams[1].source_resolution.as_deref(), Some("1920 x 1080 px"));
}

#[tokio::test]
async fn details_without_sources_is_reported() {
    let client = client().await;
    let hits = client.search("Wicked 2024").await.unwrap();
    let err = client.fetch_details(&hits[1].address).await.unwrap_err();
    assert!(matches!(err, SourceError::NoSources));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let base = upstream().await;
    let client = PrehrajClient::with_base_url(PageFetcher::http().unwrap(), &base).unwrap();
    let err = client
        .fetch_details(&format!("{base}/gone"))
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Status(404)));
}
