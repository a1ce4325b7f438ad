use std::collections::HashMap;

use crate::provider::MetadataLookup;
use crate::{MetadataError, RemoteMetadata};

/// In-memory [`MetadataLookup`] with fixed answers. Deterministic, no I/O.
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    entries: HashMap<String, RemoteMetadata>,
    offline: bool,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// A lookup that behaves like an unreachable service: every call fails.
    pub fn offline() -> Self {
        Self {
            entries: HashMap::new(),
            offline: true,
        }
    }

    pub fn with(mut self, video_id: impl Into<String>, meta: RemoteMetadata) -> Self {
        self.entries.insert(video_id.into(), meta);
        self
    }
}

#[async_trait::async_trait]
impl MetadataLookup for StaticLookup {
    fn name(&self) -> &str {
        "static"
    }

    async fn ping(&self) -> Result<(), MetadataError> {
        if self.offline {
            return Err(MetadataError::Network("offline".into()));
        }
        Ok(())
    }

    async fn lookup(&self, video_id: &str) -> Result<RemoteMetadata, MetadataError> {
        if self.offline {
            return Err(MetadataError::Network("offline".into()));
        }
        self.entries
            .get(video_id)
            .cloned()
            .ok_or(MetadataError::NotFound)
    }
}
