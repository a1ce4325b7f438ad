use std::path::{Path, PathBuf};

use tascan_core::config::Config;
use tascan_core::types::{EpisodeRecord, RecordSource};
use tascan_metadata::RemoteMetadata;
use tascan_metadata::provider::MetadataLookup;
use tascan_metadata::tubearchivist::TubeArchivistClient;
use tracing::{debug, info, warn};

use crate::host::HostPlatform;
use crate::parser;

/// Everything a scan needs, built once by the entry point and passed in.
pub struct ScanContext {
    host: Box<dyn HostPlatform>,
    lookup: Option<Box<dyn MetadataLookup>>,
}

impl ScanContext {
    pub fn new(host: Box<dyn HostPlatform>, lookup: Option<Box<dyn MetadataLookup>>) -> Self {
        Self { host, lookup }
    }

    /// Build a context from configuration. Enrichment is enabled only when
    /// the metadata service is configured and answers a ping.
    pub async fn connect(config: &Config, host: Box<dyn HostPlatform>) -> Self {
        let Some((url, token)) = config.metadata_service() else {
            info!("metadata service not configured, enrichment disabled");
            return Self::new(host, None);
        };

        let client = match config.request_timeout() {
            Some(timeout) => {
                match TubeArchivistClient::with_timeout(url, token, timeout) {
                    Ok(client) => client,
                    Err(e) => {
                        warn!(error = %e, "cannot build metadata client, enrichment disabled");
                        return Self::new(host, None);
                    }
                }
            }
            None => TubeArchivistClient::new(url, token),
        };

        Self::with_checked_lookup(host, Box::new(client)).await
    }

    /// Keep `lookup` only if it answers a ping.
    pub async fn with_checked_lookup(
        host: Box<dyn HostPlatform>,
        lookup: Box<dyn MetadataLookup>,
    ) -> Self {
        match lookup.ping().await {
            Ok(()) => {
                info!(provider = lookup.name(), "metadata service reachable, enrichment enabled");
                Self::new(host, Some(lookup))
            }
            Err(e) => {
                warn!(
                    provider = lookup.name(),
                    error = %e,
                    "metadata service unreachable, enrichment disabled for this run"
                );
                Self::new(host, None)
            }
        }
    }

    pub fn lookup(&self) -> Option<&dyn MetadataLookup> {
        self.lookup.as_deref()
    }

    pub fn enrichment_enabled(&self) -> bool {
        self.lookup.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub classified: usize,
    pub skipped: usize,
    pub enriched: usize,
}

/// Classify one file.
///
/// Returns `None` when the file name is not a `YYYYMMDD_VIDEOID_TITLE`
/// archive name. Lookup failures never escape: the filename-derived values
/// are kept.
pub async fn classify(
    file: &Path,
    show_hint: &str,
    lookup: Option<&dyn MetadataLookup>,
) -> Option<EpisodeRecord> {
    let stem = file.file_stem()?.to_string_lossy();
    let name = parser::parse_archive_name(&stem)?;
    let mut record = name.to_record(show_hint);

    if let Some(lookup) = lookup {
        match lookup.lookup(&name.video_id).await {
            Ok(meta) => apply_remote(&mut record, &meta),
            Err(e) => {
                warn!(
                    video_id = %name.video_id,
                    provider = lookup.name(),
                    error = %e,
                    "metadata lookup failed, using filename values"
                );
            }
        }
    }

    record.parts.push(file.to_path_buf());
    Some(record)
}

fn apply_remote(record: &mut EpisodeRecord, meta: &RemoteMetadata) {
    record.show = meta.show_name();
    record.title = meta.title.clone();
    record.season = meta.published.format("%Y").to_string();
    record.episode = meta.published.format("%Y%m%d").to_string();
    record.released_at = Some(meta.published);
    record.source = RecordSource::Remote;
}

/// Scan one library folder and append a record per recognized file.
///
/// `dir` is relative to the library root; its first segment names the show
/// unless the metadata service supplies a channel.
pub async fn scan(
    ctx: &ScanContext,
    dir: &Path,
    files: &[PathBuf],
    media: &mut Vec<EpisodeRecord>,
) -> ScanResult {
    let mut result = ScanResult::default();
    let videos = ctx.host.video_files(dir, files);
    let segments = ctx.host.split_path(dir);

    match segments.first().filter(|s| !s.is_empty()) {
        Some(top) => {
            let (show, _year) = ctx.host.clean_name(top);
            for file in &videos {
                match classify(file, &show, ctx.lookup()).await {
                    Some(record) => {
                        if record.source == RecordSource::Remote {
                            result.enriched += 1;
                        }
                        result.classified += 1;
                        media.push(record);
                    }
                    None => {
                        debug!(path = %file.display(), "not an archive file name, skipping");
                        result.skipped += 1;
                    }
                }
            }
        }
        None => {
            warn!(dir = %dir.display(), "no folder to take a show name from, nothing classified");
            result.skipped = videos.len();
        }
    }

    ctx.host.stack(dir, media);

    info!(
        dir = %dir.display(),
        videos = videos.len(),
        classified = result.classified,
        enriched = result.enriched,
        skipped = result.skipped,
        "scan finished"
    );
    result
}
