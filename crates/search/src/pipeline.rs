use std::sync::Arc;

use ezstream_core::types::{Candidate, RankedResult, TitleContext};
use tracing::info;

use crate::executor::run_bounded;
use crate::filter::filter_candidates;
use crate::query::expand_queries;
use crate::rank::{compose, rank};
use crate::source::{DetailsSource, SearchSource, SourceError};

/// Concurrency and volume limits for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Keep at 1 when the search source drives a single shared browser session.
    pub search_concurrency: usize,
    pub extract_concurrency: usize,
    /// Unique candidates handed to the extraction stage, earliest first.
    pub max_candidates: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_concurrency: 1,
            extract_concurrency: 5,
            max_candidates: 25,
        }
    }
}

/// Work item tagged with its input position so stage output can be put back in
/// a deterministic order.
struct Indexed<T> {
    index: usize,
    item: T,
}

impl<T: std::fmt::Display> std::fmt::Display for Indexed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.index, self.item)
    }
}

fn indexed<T>(items: Vec<T>) -> Vec<Indexed<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| Indexed { index, item })
        .collect()
}

/// Drop the tags after restoring input order. Stable, so results of one item
/// keep their relative order.
fn in_input_order<R>(mut tagged: Vec<(usize, R)>) -> Vec<R> {
    tagged.sort_by_key(|(index, _)| *index);
    tagged.into_iter().map(|(_, result)| result).collect()
}

/// Search, filter, extract and rank playable streams for one title.
pub struct StreamPipeline {
    search: Arc<dyn SearchSource>,
    details: Arc<dyn DetailsSource>,
    config: PipelineConfig,
}

impl StreamPipeline {
    pub fn new(
        search: Arc<dyn SearchSource>,
        details: Arc<dyn DetailsSource>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            search,
            details,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage and return the ranked streams. Never fails; individual
    /// search or extraction failures only shrink the result.
    pub async fn run(&self, ctx: &TitleContext) -> Vec<RankedResult> {
        let queries = expand_queries(ctx);
        if queries.is_empty() {
            info!(name = %ctx.name, "no usable search queries");
            return Vec::new();
        }
        info!(queries = ?queries, "searching upstream");

        let candidates = self.search_all(queries).await;
        let found = candidates.len();
        let mut unique = filter_candidates(candidates, ctx);
        info!(found, unique = unique.len(), "search stage complete");
        unique.truncate(self.config.max_candidates);

        let streams = self.extract_all(unique).await;
        let ranked = rank(streams, &ctx.year);
        info!(streams = ranked.len(), "ranked streams");
        ranked
    }

    async fn search_all(&self, queries: Vec<String>) -> Vec<Candidate> {
        let source = self.search.clone();
        let tagged: Vec<(usize, Candidate)> = run_bounded(
            "search",
            indexed(queries),
            self.config.search_concurrency,
            move |query: Indexed<String>| {
                let source = source.clone();
                async move {
                    let hits = source.search(&query.item).await?;
                    let tagged: Vec<_> = hits.into_iter().map(|c| (query.index, c)).collect();
                    Ok::<_, SourceError>(tagged)
                }
            },
        )
        .await;

        in_input_order(tagged)
    }

    async fn extract_all(&self, candidates: Vec<Candidate>) -> Vec<RankedResult> {
        let source = self.details.clone();
        let tagged: Vec<(usize, RankedResult)> = run_bounded(
            "extract",
            indexed(candidates),
            self.config.extract_concurrency,
            move |candidate: Indexed<Candidate>| {
                let source = source.clone();
                async move {
                    let streams = source.fetch_details(&candidate.item.address).await?;
                    Ok::<_, SourceError>(
                        streams
                            .iter()
                            .map(|s| (candidate.index, compose(s, &candidate.item)))
                            .collect::<Vec<_>>(),
                    )
                }
            },
        )
        .await;

        in_input_order(tagged)
    }
}
