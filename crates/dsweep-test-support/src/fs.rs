//! Temporary directory trees for filesystem scenarios.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Kind of entry to create inside a scenario directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file with a small payload.
    File,
    /// A directory containing one nested file.
    Dir,
}

/// A temporary root with `source/` and `destination/` subdirectories.
#[derive(Debug)]
pub struct SweepTree {
    root: TempDir,
    source: PathBuf,
    destination: PathBuf,
}

impl SweepTree {
    /// Create the tree with empty source and destination directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directories cannot be created.
    pub fn new() -> io::Result<Self> {
        let root = tempfile::Builder::new().prefix("dsweep-").tempdir()?;
        let source = root.path().join("source");
        let destination = root.path().join("destination");
        fs::create_dir(&source)?;
        fs::create_dir(&destination)?;
        Ok(Self {
            root,
            source,
            destination,
        })
    }

    /// Root of the temporary tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Directory scanned for entries.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Directory that receives relocated entries.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Create entries in the source directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry cannot be written.
    pub fn populate_source(&self, entries: &[(&str, EntryKind)]) -> io::Result<()> {
        populate(&self.source, entries)
    }

    /// Create entries in the destination directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry cannot be written.
    pub fn populate_destination(&self, entries: &[(&str, EntryKind)]) -> io::Result<()> {
        populate(&self.destination, entries)
    }
}

/// Create each entry under `dir`.
///
/// # Errors
///
/// Returns an error if an entry cannot be written.
pub fn populate(dir: &Path, entries: &[(&str, EntryKind)]) -> io::Result<()> {
    for (name, kind) in entries {
        let path = dir.join(name);
        match kind {
            EntryKind::File => fs::write(&path, name.as_bytes())?,
            EntryKind::Dir => {
                fs::create_dir(&path)?;
                fs::write(path.join("payload.bin"), name.as_bytes())?;
            }
        }
    }
    Ok(())
}

/// Sorted names of the immediate entries of `dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn entry_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}
