use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use ezstream_core::error::ApiError;
use ezstream_core::types::MediaKind;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::addon::{self, Manifest, StreamsResponse};
use crate::error::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/manifest.json", get(manifest))
        .route("/stream/{kind}/{id}", get(streams))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Add-on
// ---------------------------------------------------------------------------

async fn manifest() -> Json<Manifest> {
    Json(addon::manifest())
}

async fn streams(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<StreamsResponse>, AppError> {
    let kind = MediaKind::parse(&kind)
        .ok_or_else(|| ApiError::BadRequest(format!("unsupported type: {kind}")))?;

    let Some(request) = addon::parse_stream_id(&id) else {
        debug!(id = %id, "ignoring foreign stream id");
        return Ok(Json(StreamsResponse::default()));
    };

    let details = match state.titles.lookup(kind, &request.tmdb_id).await {
        Ok(details) => details,
        Err(e) => {
            warn!(
                provider = state.titles.name(),
                tmdb_id = %request.tmdb_id,
                error = %e,
                "title lookup failed"
            );
            return Ok(Json(StreamsResponse::default()));
        }
    };

    let episode = match kind {
        MediaKind::Series => request.episode,
        MediaKind::Movie => None,
    };
    let ctx = details.to_context(episode);
    let streams = state.pipeline.run(&ctx).await;

    info!(
        kind = %kind,
        title = %ctx.name,
        episode = ctx.episode_tag().as_deref().unwrap_or("-"),
        count = streams.len(),
        "streams resolved"
    );
    Ok(Json(StreamsResponse { streams }))
}

async fn not_found() -> AppError {
    AppError(ApiError::NotFound("no such route".into()))
}
