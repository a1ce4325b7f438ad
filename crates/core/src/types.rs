use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One recognized archive file, shaped the way a TV library expects an
/// episode: the show is the channel (or the folder), the season is a year and
/// the episode is a date fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub show: String,
    pub season: String,
    pub episode: String,
    pub title: String,
    pub released_at: Option<NaiveDate>,
    pub video_id: String,
    pub source: RecordSource,
    /// Source files making up this episode. Normally exactly one.
    pub parts: Vec<PathBuf>,
}

impl EpisodeRecord {
    pub fn new(
        show: impl Into<String>,
        season: impl Into<String>,
        episode: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            show: show.into(),
            season: season.into(),
            episode: episode.into(),
            title: title.into(),
            released_at: None,
            video_id: String::new(),
            source: RecordSource::Filename,
            parts: Vec::new(),
        }
    }
}

impl std::fmt::Display for EpisodeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - S{}E{} - {}",
            self.show, self.season, self.episode, self.title
        )
    }
}

/// Where a record's show/season/episode values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    Filename,
    Remote,
}

impl RecordSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Filename => "filename",
            Self::Remote => "remote",
        }
    }
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
