//! Listing the immediate entries of the source directory.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{FsOpsError, FsOpsResult};
use crate::model::FilesystemEntry;

/// Whether `name` is a hidden entry (leading `.`).
#[must_use]
pub fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// Immediate, non-hidden entries of `dir`, sorted by name.
///
/// Symlinks are reported as non-directories and never followed.
///
/// # Errors
///
/// Returns [`FsOpsError::Io`] when the directory or one of its entries cannot
/// be read.
pub fn scan_entries(dir: &Path) -> FsOpsResult<Vec<FilesystemEntry>> {
    let reader = fs::read_dir(dir).map_err(|source| FsOpsError::io("scan.read_dir", dir, source))?;

    let mut entries = Vec::new();
    let mut hidden = 0_usize;
    for item in reader {
        let item = item.map_err(|source| FsOpsError::io("scan.read_dir_entry", dir, source))?;
        let name = item.file_name();
        if is_hidden(&name) {
            hidden += 1;
            continue;
        }
        let file_type = item
            .file_type()
            .map_err(|source| FsOpsError::io("scan.file_type", item.path(), source))?;
        entries.push(FilesystemEntry::new(name, file_type.is_dir()));
    }
    entries.sort_by(|left, right| left.name.cmp(&right.name));

    debug!(
        directory = %dir.display(),
        entries = entries.len(),
        hidden,
        "scanned source directory"
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::io;

    fn scratch() -> io::Result<tempfile::TempDir> {
        tempfile::Builder::new().prefix("dsweep-scan-").tempdir()
    }

    #[test]
    fn hidden_names_start_with_dot() {
        assert!(is_hidden(OsStr::new(".DS_Store")));
        assert!(is_hidden(OsStr::new("..")));
        assert!(!is_hidden(OsStr::new("Movie.A")));
        assert!(!is_hidden(OsStr::new("")));
    }

    #[test]
    fn lists_visible_entries_sorted() -> anyhow::Result<()> {
        let dir = scratch()?;
        fs::write(dir.path().join("b.mkv"), b"b")?;
        fs::create_dir(dir.path().join("a-dir"))?;
        fs::write(dir.path().join(".hidden"), b"h")?;
        fs::create_dir(dir.path().join(".cache"))?;

        let entries = scan_entries(dir.path())?;

        assert_eq!(
            entries,
            vec![
                FilesystemEntry::new(OsString::from("a-dir"), true),
                FilesystemEntry::new(OsString::from("b.mkv"), false),
            ]
        );
        Ok(())
    }

    #[test]
    fn does_not_descend_into_directories() -> anyhow::Result<()> {
        let dir = scratch()?;
        fs::create_dir_all(dir.path().join("Show/Season 1"))?;
        fs::write(dir.path().join("Show/Season 1/e01.mkv"), b"e")?;

        let entries = scan_entries(dir.path())?;

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title_key(), Some("Show"));
        assert!(entries[0].is_dir);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_to_directories_are_not_followed() -> anyhow::Result<()> {
        let dir = scratch()?;
        let target = scratch()?;
        std::os::unix::fs::symlink(target.path(), dir.path().join("link"))?;

        let entries = scan_entries(dir.path())?;

        assert_eq!(entries, vec![FilesystemEntry::new("link", false)]);
        Ok(())
    }

    #[test]
    fn missing_directory_reports_path() -> anyhow::Result<()> {
        let dir = scratch()?;
        let missing = dir.path().join("absent");

        let err = scan_entries(&missing)
            .err()
            .ok_or_else(|| anyhow::anyhow!("scan should fail"))?;

        match err {
            FsOpsError::Io {
                operation, path, ..
            } => {
                assert_eq!(operation, "scan.read_dir");
                assert_eq!(path, missing);
            }
            other => return Err(anyhow::anyhow!("unexpected error: {other}")),
        }
        Ok(())
    }
}
