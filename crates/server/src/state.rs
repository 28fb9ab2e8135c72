use std::sync::Arc;

use ezstream_metadata::provider::TitleLookup;
use ezstream_search::StreamPipeline;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub titles: Arc<dyn TitleLookup>,
    pub pipeline: Arc<StreamPipeline>,
}
