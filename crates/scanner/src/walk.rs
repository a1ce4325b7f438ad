use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::parser;

// Known junk directories
static SKIP_DIRS: &[&str] = &["@eaDir", "#recycle"];

/// List the files in `root`, skipping hidden entries and ignored patterns.
///
/// With `recursive`, subdirectories are walked too; unreadable entries are
/// logged and skipped. Symlinked folders are never entered, symlinked files
/// are listed. The result is sorted so scans are reproducible.
pub fn list_files(root: &Path, recursive: bool) -> std::io::Result<Vec<PathBuf>> {
    // A missing or unreadable root is an error, not an empty listing.
    std::fs::read_dir(root)?;

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || keep(e));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "cannot read directory entry");
                continue;
            }
        };
        let file_type = entry.file_type();
        if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
            files.push(entry.into_path());
        } else if file_type.is_symlink() {
            debug!(path = %entry.path().display(), "not following symlinked folder");
        }
    }
    files.sort();
    Ok(files)
}

fn keep(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();

    // Skip hidden files/dirs and ignored patterns
    if name.starts_with('.') || parser::should_ignore(&name) {
        debug!(path = %entry.path().display(), "skipping ignored entry");
        return false;
    }
    !(entry.file_type().is_dir() && SKIP_DIRS.contains(&name.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_sorted_files_and_skips_hidden() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.mp4", "a.mp4", ".hidden.mp4", "a.info.json"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("c.mp4"), b"").unwrap();

        let flat = list_files(dir.path(), false).unwrap();
        assert_eq!(
            flat,
            vec![dir.path().join("a.mp4"), dir.path().join("b.mp4")]
        );

        let deep = list_files(dir.path(), true).unwrap();
        assert_eq!(deep.len(), 3);
        assert!(deep.contains(&dir.path().join("sub").join("c.mp4")));
    }

    #[cfg(unix)]
    #[test]
    fn looping_symlink_is_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("c.mp4"), b"").unwrap();
        std::os::unix::fs::symlink(dir.path(), sub.join("loop")).unwrap();

        let files = list_files(dir.path(), true).unwrap();
        assert_eq!(files, vec![sub.join("c.mp4")]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real.mp4");
        std::fs::write(&target, b"").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link.mp4")).unwrap();

        let files = list_files(dir.path(), false).unwrap();
        assert_eq!(files, vec![dir.path().join("link.mp4"), target]);
    }

    #[test]
    fn junk_folders_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("@eaDir")).unwrap();
        std::fs::write(dir.path().join("@eaDir").join("x.mp4"), b"").unwrap();
        assert!(list_files(dir.path(), true).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_files(&dir.path().join("missing"), false).is_err());
    }
}
