//! Collection of the files to put into an archive.
//!
//! A single file source yields one entry named after the file. A directory
//! source yields every regular file below it, named relative to the source's
//! parent directory so the directory name itself is the first path component
//! inside the archive. Empty directories are not recorded.

use crate::ArchiveError;
use crate::Result;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// One file selected for archiving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Path on disk.
    pub path: PathBuf,
    /// Path stored inside the archive.
    pub archive_path: PathBuf,
    /// File size in bytes at collection time.
    pub size: u64,
}

/// Ordered list of files to archive, named relative to the source's parent
/// directory.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use tarc_core::FileManifest;
///
/// let manifest = FileManifest::collect(Path::new("/data/reports"))?;
/// for entry in manifest.entries() {
///     println!("{}", entry.archive_path.display());
/// }
/// # Ok::<(), tarc_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileManifest {
    entries: Vec<ManifestEntry>,
}

impl FileManifest {
    /// Builds the manifest for `source`.
    ///
    /// Directory traversal does not follow symlinked directories; symlinks
    /// that resolve to regular files are included. Entries within a
    /// directory are ordered by file name.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::SourceNotFound`] if `source` does not exist,
    /// or an I/O error if the tree cannot be read.
    pub fn collect(source: &Path) -> Result<Self> {
        if !source.exists() {
            return Err(ArchiveError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }

        let prefix = source.file_name().map(PathBuf::from).unwrap_or_default();

        let entries = if source.is_file() {
            vec![ManifestEntry {
                path: source.to_path_buf(),
                archive_path: prefix,
                size: fs::metadata(source)?.len(),
            }]
        } else {
            walk_files(source, &prefix)?
        };

        tracing::debug!(
            source = %source.display(),
            files = entries.len(),
            "collected manifest"
        );

        Ok(Self { entries })
    }

    /// Entries in archive order.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no files were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the only entry when the manifest holds exactly one file.
    #[must_use]
    pub fn single(&self) -> Option<&ManifestEntry> {
        match self.entries.as_slice() {
            [entry] => Some(entry),
            _ => None,
        }
    }

    /// Sum of all file sizes.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|entry| entry.size).sum()
    }
}

fn walk_files(root: &Path, prefix: &Path) -> Result<Vec<ManifestEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            ArchiveError::Io(std::io::Error::other(format!("walkdir error: {e}")))
        })?;

        let file_type = entry.file_type();
        let metadata = if file_type.is_file() {
            entry.metadata().map_err(|e| {
                ArchiveError::Io(std::io::Error::other(format!(
                    "cannot read metadata for {}: {e}",
                    entry.path().display()
                )))
            })?
        } else if file_type.is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(metadata) if metadata.is_file() => metadata,
                _ => continue,
            }
        } else {
            continue;
        };

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        entries.push(ManifestEntry {
            path: entry.path().to_path_buf(),
            archive_path: archive_path(prefix, relative),
            size: metadata.len(),
        });
    }

    Ok(entries)
}

/// Joins `prefix` and `relative`, keeping only normal components.
fn archive_path(prefix: &Path, relative: &Path) -> PathBuf {
    prefix
        .components()
        .chain(relative.components())
        .filter(|component| matches!(component, Component::Normal(_)))
        .collect()
}
