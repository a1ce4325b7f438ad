use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tascan_core::types::EpisodeRecord;

/// Fields of a `YYYYMMDD_VIDEOID_TITLE` archive filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName {
    /// `YYYYMMDD`, as written in the filename.
    pub air_date: String,
    pub video_id: String,
    pub title: String,
}

impl ArchiveName {
    /// Year part of the air date.
    pub fn season(&self) -> &str {
        &self.air_date[..4]
    }

    /// `MMDD` part of the air date.
    pub fn episode(&self) -> &str {
        &self.air_date[4..]
    }

    /// The air date as a calendar date, if it is one.
    pub fn released_at(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.air_date, "%Y%m%d").ok()
    }

    /// Record built from the filename alone.
    pub fn to_record(&self, show: &str) -> EpisodeRecord {
        let mut record = EpisodeRecord::new(show, self.season(), self.episode(), &self.title);
        record.released_at = self.released_at();
        record.video_id = self.video_id.clone();
        record
    }
}

// Patterns to ignore
static IGNORE_NAMES: &[&str] = &[
    ".DS_Store",
    "Thumbs.db",
    "@eaDir",
    ".nfo",
    ".txt",
    ".json",
    ".jpg",
    ".jpeg",
    ".png",
    ".webp",
    ".srt",
    ".vtt",
    ".sub",
    ".idx",
    ".ass",
    ".ssa",
    ".part",
];

static VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "mov", "wmv", "flv", "webm", "ts", "mpg", "mpeg", "3gp", "ogv",
    "m2ts", "mts", "vob", "mxf", "f4v", "3g2", "asf", "mpe", "mpv",
];

// YYYYMMDD_XXXXXXXXXXX_TITLE
static RE_ARCHIVE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([0-9]{8})_([a-z0-9]{11})_(.*)$").unwrap());

// Folder: "Name (Year)"
static RE_YEAR_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\((\d{4})\)$").unwrap());

// Folder: "Name Year"
static RE_YEAR_TRAILING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+(\d{4})$").unwrap());

/// Parse a filename stem (no directory, no extension).
pub fn parse_archive_name(stem: &str) -> Option<ArchiveName> {
    let caps = RE_ARCHIVE_NAME.captures(stem)?;
    Some(ArchiveName {
        air_date: caps[1].to_string(),
        video_id: caps[2].to_string(),
        title: caps[3].to_string(),
    })
}

/// Check if a filename should be ignored.
pub fn should_ignore(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    IGNORE_NAMES
        .iter()
        .any(|pat| lower == pat.to_lowercase() || lower.ends_with(pat))
}

/// Check if a file has a video extension.
pub fn is_video_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Normalize a folder name into a show name and optional year.
///
/// Dots and underscores become spaces and runs of whitespace collapse.
pub fn clean_name(raw: &str) -> (String, Option<u16>) {
    let cleaned = raw
        .replace(['.', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    for re in [&*RE_YEAR_PAREN, &*RE_YEAR_TRAILING] {
        if let Some(caps) = re.captures(&cleaned) {
            if let Ok(year) = caps[2].parse::<u16>() {
                if (1900..=2100).contains(&year) {
                    return (caps[1].trim().to_string(), Some(year));
                }
            }
        }
    }

    (cleaned, None)
}

/// Ordered path segments, without roots, `.` or `..`.
pub fn split_path(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_archive_name_fields() {
        let n = parse_archive_name("20210605_AbCdEfGhIjK_My Title").unwrap();
        assert_eq!(n.air_date, "20210605");
        assert_eq!(n.video_id, "AbCdEfGhIjK");
        assert_eq!(n.title, "My Title");
        assert_eq!(n.season(), "2021");
        assert_eq!(n.episode(), "0605");
        assert_eq!(n.released_at(), NaiveDate::from_ymd_opt(2021, 6, 5));
    }

    #[test]
    fn title_keeps_underscores_and_may_be_empty() {
        let n = parse_archive_name("20200101_abcdefghijk_a_b_c").unwrap();
        assert_eq!(n.title, "a_b_c");
        let n = parse_archive_name("20200101_ABCDEFGHIJK_").unwrap();
        assert_eq!(n.title, "");
    }

    #[test]
    fn rejects_non_archive_names() {
        for stem in [
            "",
            "20210605",
            "20210605_AbCdEfGhIjK",
            "20210605_AbCdEfGhIjKMy Title",
            "2021065_AbCdEfGhIjK_x",
            "20210605_AbCdEfGhIj_x",
            "20210605_AbCdEfGhIjKL_x",
            "20210605-AbCdEfGhIjK-x",
            "x20210605_AbCdEfGhIjK_x",
            "20210605_AbCd-fGhIjK_x",
            "Breaking.Bad.S02E05",
        ] {
            assert!(parse_archive_name(stem).is_none(), "should NOT match {stem:?}");
        }
    }

    #[test]
    fn impossible_dates_still_match_without_release_date() {
        let n = parse_archive_name("20211399_AbCdEfGhIjK_x").unwrap();
        assert_eq!(n.season(), "2021");
        assert_eq!(n.episode(), "1399");
        assert_eq!(n.released_at(), None);
    }

    #[test]
    fn to_record_uses_hint_and_filename_fields() {
        let rec = parse_archive_name("20210605_AbCdEfGhIjK_My Title")
            .unwrap()
            .to_record("Some Channel");
        assert_eq!(rec.show, "Some Channel");
        assert_eq!(rec.season, "2021");
        assert_eq!(rec.episode, "0605");
        assert_eq!(rec.title, "My Title");
        assert_eq!(rec.video_id, "AbCdEfGhIjK");
        assert!(rec.parts.is_empty());
    }

    #[test]
    fn ignore_patterns() {
        assert!(should_ignore(".DS_Store"));
        assert!(should_ignore("Thumbs.db"));
        assert!(should_ignore("20210605_AbCdEfGhIjK_x.info.json"));
        assert!(should_ignore("poster.jpg"));
        assert!(should_ignore("video.en.vtt"));
        assert!(!should_ignore("movie.mkv"));
    }

    #[test]
    fn video_extension_check() {
        assert!(is_video_file("movie.mkv"));
        assert!(is_video_file("Movie.MP4"));
        assert!(is_video_file("20210605_AbCdEfGhIjK_v1.2 final.webm"));
        assert!(!is_video_file("poster.jpg"));
        assert!(!is_video_file("mkv"));
    }

    #[test]
    fn clean_name_plain() {
        assert_eq!(clean_name("Some_Channel"), ("Some Channel".into(), None));
        assert_eq!(clean_name("  a.b   c "), ("a b c".into(), None));
    }

    #[test]
    fn clean_name_with_year() {
        assert_eq!(clean_name("Show (2019)"), ("Show".into(), Some(2019)));
        assert_eq!(clean_name("Show.2019"), ("Show".into(), Some(2019)));
        assert_eq!(clean_name("Channel 0042"), ("Channel 0042".into(), None));
    }

    #[test]
    fn split_path_segments() {
        assert_eq!(
            split_path(Path::new("/Channel/2021/extra")),
            vec!["Channel", "2021", "extra"]
        );
        assert_eq!(split_path(Path::new("Channel")), vec!["Channel"]);
        assert!(split_path(Path::new("/")).is_empty());
    }
}
