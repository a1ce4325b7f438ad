use std::path::{Path, PathBuf};

use tascan_core::types::EpisodeRecord;

use crate::parser;

/// Services a media-management host provides to a scanner.
pub trait HostPlatform: Send + Sync {
    /// The subset of `files` the host recognizes as playable video.
    fn video_files(&self, dir: &Path, files: &[PathBuf]) -> Vec<PathBuf>;

    /// Normalize a folder name into a show name and optional year.
    fn clean_name(&self, name: &str) -> (String, Option<u16>);

    /// Ordered segments of a library-relative path.
    fn split_path(&self, path: &Path) -> Vec<String>;

    /// Group records whose files are parts of one logical item.
    fn stack(&self, dir: &Path, media: &mut Vec<EpisodeRecord>);
}

/// Host used when running outside a media server.
///
/// Video detection is by extension and stacking is left to the caller:
/// every record keeps its single part.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandaloneHost;

impl HostPlatform for StandaloneHost {
    fn video_files(&self, _dir: &Path, files: &[PathBuf]) -> Vec<PathBuf> {
        files
            .iter()
            .filter(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy())
                    .is_some_and(|n| !parser::should_ignore(&n) && parser::is_video_file(&n))
            })
            .cloned()
            .collect()
    }

    fn clean_name(&self, name: &str) -> (String, Option<u16>) {
        parser::clean_name(name)
    }

    fn split_path(&self, path: &Path) -> Vec<String> {
        parser::split_path(path)
    }

    fn stack(&self, _dir: &Path, _media: &mut Vec<EpisodeRecord>) {}
}
