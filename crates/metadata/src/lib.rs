pub mod fake;
pub mod provider;
pub mod tubearchivist;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
}

/// Channel and publish information for one archived video.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoteMetadata {
    pub channel_name: String,
    pub channel_id: String,
    pub title: String,
    pub published: NaiveDate,
}

impl RemoteMetadata {
    /// Show name as presented to the library: `"{channel} [{channel id}]"`.
    pub fn show_name(&self) -> String {
        format!("{} [{}]", self.channel_name, self.channel_id)
    }
}

/// Parse a publish date as the metadata service renders it (`"05 Jun, 2021"`).
/// ISO dates are accepted as well.
pub fn parse_published(raw: &str) -> Result<NaiveDate, MetadataError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%d %b, %Y")
        .ok()
        .or_else(|| {
            raw.get(..10)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        })
        .ok_or_else(|| MetadataError::Provider(format!("unrecognized publish date: {raw:?}")))
}
