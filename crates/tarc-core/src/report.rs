//! Archive and extract operation reporting.

use crate::formats::compression::CompressionKind;
use std::path::PathBuf;
use std::time::Duration;

/// Report of an archive operation.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tarc_core::ArchiveReport;
/// use tarc_core::CompressionKind;
///
/// let mut report = ArchiveReport::new("out.tar.zst".into(), CompressionKind::Zstd);
/// report.bytes_read = 1024;
/// report.bytes_compressed = 256;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveReport {
    /// Canonical archive path that was written.
    pub target: PathBuf,

    /// Codec used.
    pub kind: CompressionKind,

    /// Number of files stored.
    pub files_added: usize,

    /// Total uncompressed bytes read from the source.
    pub bytes_read: u64,

    /// Size of the archive on disk.
    pub bytes_compressed: u64,

    /// `true` when a single file was written as a bare zstd stream.
    pub bare_stream: bool,

    /// Wall-clock duration of the operation.
    pub duration: Duration,

    /// Duration to display, set only when benchmarking was requested.
    pub benchmark: Option<Duration>,
}

impl ArchiveReport {
    /// Creates an empty report for `target`.
    #[must_use]
    pub fn new(target: PathBuf, kind: CompressionKind) -> Self {
        Self {
            target,
            kind,
            files_added: 0,
            bytes_read: 0,
            bytes_compressed: 0,
            bare_stream: false,
            duration: Duration::ZERO,
            benchmark: None,
        }
    }

    /// Uncompressed size divided by compressed size (0.0 when empty).
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.bytes_compressed as f64
    }

    /// Space saved, as a percentage of the uncompressed size.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_read == 0 {
            return 0.0;
        }
        (1.0 - self.bytes_compressed as f64 / self.bytes_read as f64) * 100.0
    }
}

/// Report of an extract operation.
#[derive(Debug, Clone)]
pub struct ExtractReport {
    /// Canonical archive path that was read.
    pub archive: PathBuf,

    /// Codec used.
    pub kind: CompressionKind,

    /// Directory the members were written to.
    pub output_dir: PathBuf,

    /// Number of members written.
    pub members_extracted: usize,

    /// Number of members skipped because they would land outside
    /// `output_dir`.
    pub members_skipped: usize,

    /// `true` when the archive was a bare single-file zstd stream.
    pub bare_stream: bool,

    /// Wall-clock duration of the operation.
    pub duration: Duration,

    /// Duration to display, set only when benchmarking was requested.
    pub benchmark: Option<Duration>,
}

impl ExtractReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new(archive: PathBuf, kind: CompressionKind, output_dir: PathBuf) -> Self {
        Self {
            archive,
            kind,
            output_dir,
            members_extracted: 0,
            members_skipped: 0,
            bare_stream: false,
            duration: Duration::ZERO,
            benchmark: None,
        }
    }
}
