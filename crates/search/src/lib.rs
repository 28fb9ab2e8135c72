pub mod executor;
pub mod extract;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod query;
pub mod rank;
pub mod source;

pub use pipeline::{PipelineConfig, StreamPipeline};
pub use source::{DetailsSource, SearchSource, SourceError};
