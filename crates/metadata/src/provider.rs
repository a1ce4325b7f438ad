use crate::{MetadataError, RemoteMetadata};

/// A source of per-video channel/publish metadata.
#[async_trait::async_trait]
pub trait MetadataLookup: Send + Sync {
    fn name(&self) -> &str;

    /// Confirm the service is reachable and the credentials are accepted.
    async fn ping(&self) -> Result<(), MetadataError>;

    /// Fetch metadata for one video identifier.
    async fn lookup(&self, video_id: &str) -> Result<RemoteMetadata, MetadataError>;
}
