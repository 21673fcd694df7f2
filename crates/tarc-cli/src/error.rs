//! Error conversion utilities for CLI.
//!
//! Converts tarc-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use tarc_core::ArchiveError;
use tarc_core::error::SUPPORTED_FORMS;

use anyhow::anyhow;

/// Converts `ArchiveError` to a user-friendly anyhow error with context.
///
/// `operation` names what was being done ("archive" or "extract") and
/// `subject` the path as the user typed it.
pub fn convert_archive_error(err: ArchiveError, operation: &str, subject: &str) -> anyhow::Error {
    match err {
        ArchiveError::SourceNotFound { path } => {
            anyhow!(
                "Source not found: {}\n\
                 HINT: Check the path; the source must be an existing file or directory.",
                path.display()
            )
        }
        ArchiveError::ArchiveNotFound { path } => {
            anyhow!(
                "Archive not found: {}\n\
                 HINT: Bare .zst / .bz2 names are looked up as .tar.zst / .tar.bz2.",
                path.display()
            )
        }
        ArchiveError::UnsupportedFormat { name } => {
            anyhow!(
                "Unsupported archive format: '{name}'\n\
                 HINT: Supported formats: {SUPPORTED_FORMS}"
            )
        }
        ArchiveError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{subject}': {reason}\n\
                 HINT: The archive may be corrupted or truncated."
            )
        }
        ArchiveError::Io(io_err) => {
            anyhow!("I/O error during {operation} of '{subject}': {io_err}")
        }
    }
}

/// Maps a core result into an anyhow result with CLI context.
pub fn add_archive_context<T>(
    result: tarc_core::Result<T>,
    operation: &str,
    subject: &str,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, operation, subject))
}
