use ezstream_core::types::MediaKind;

use crate::{MetadataError, TitleDetails};

/// Resolves a catalog id to the title facts used for stream search.
#[async_trait::async_trait]
pub trait TitleLookup: Send + Sync {
    fn name(&self) -> &str;

    /// Look up a movie or series by the provider's own id.
    async fn lookup(
        &self,
        kind: MediaKind,
        provider_id: &str,
    ) -> Result<TitleDetails, MetadataError>;
}
