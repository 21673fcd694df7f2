//! Error types for archive and extract operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Human-readable list of the accepted archive name forms.
pub const SUPPORTED_FORMS: &str = ".tar.zst (or .zst), .tar.bz2 (or .bz2)";

/// Errors that can occur while archiving or extracting.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed (includes codec and container failures).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file or directory to archive does not exist.
    #[error("source path not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// The archive to extract does not exist.
    #[error("archive not found: {path}")]
    ArchiveNotFound {
        /// The canonical archive path that was looked up.
        path: PathBuf,
    },

    /// The archive name ends in neither recognized suffix.
    #[error("unsupported archive format for '{name}': use .tar.zst or .tar.bz2")]
    UnsupportedFormat {
        /// The name as supplied by the caller.
        name: String,
    },

    /// Archive contents are malformed.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),
}

impl ArchiveError {
    /// Returns `true` if the error means an input path was missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use tarc_core::ArchiveError;
    ///
    /// let err = ArchiveError::ArchiveNotFound {
    ///     path: PathBuf::from("missing.tar.zst"),
    /// };
    /// assert!(err.is_not_found());
    ///
    /// let err = ArchiveError::UnsupportedFormat {
    ///     name: "out.xyz".to_string(),
    /// };
    /// assert!(!err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. } | Self::ArchiveNotFound { .. }
        )
    }

    pub(crate) fn unsupported(name: &str) -> Self {
        Self::UnsupportedFormat {
            name: name.to_string(),
        }
    }
}
