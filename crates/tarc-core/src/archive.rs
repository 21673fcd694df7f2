//! Archive pipeline: file or directory to `.tar.zst` / `.tar.bz2`.

use crate::ArchiveError;
use crate::Result;
use crate::config::ArchiveConfig;
use crate::formats::bare::write_bare_stream;
use crate::formats::codec::CompressedWriter;
use crate::formats::compression::CompressionKind;
use crate::formats::detect::normalize;
use crate::formats::detect::select_kind;
use crate::manifest::FileManifest;
use crate::manifest::ManifestEntry;
use crate::progress::ProgressCallback;
use crate::progress::track;
use crate::report::ArchiveReport;
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tar::Builder;
use tar::Header;
use tar::HeaderMode;

/// Progress label used while adding files.
pub const ARCHIVING_LABEL: &str = "archiving";

/// A request to archive `source` into `target`.
///
/// `target` is kept exactly as typed; the pipeline derives the compression
/// kind and the canonical file name from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    /// File or directory to archive.
    pub source: PathBuf,
    /// Archive name as supplied by the user.
    pub target: String,
    /// Report elapsed time.
    pub benchmark: bool,
}

impl ArchiveRequest {
    /// Creates a request without benchmarking.
    pub fn new(source: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            benchmark: false,
        }
    }

    /// Sets whether elapsed time is reported.
    #[must_use]
    pub fn with_benchmark(mut self, benchmark: bool) -> Self {
        self.benchmark = benchmark;
        self
    }
}

/// Archives `request.source` into the canonical form of `request.target`.
///
/// Steps, in order:
///
/// 1. fail with [`ArchiveError::SourceNotFound`] if the source is missing
/// 2. select the compression kind from the target as typed
/// 3. start the timer
/// 4. normalize the target into its canonical name
/// 5. collect the file manifest
/// 6. write the archive
///
/// A zstd target with a single-file manifest is written as a bare zstd
/// stream with no tar container. Bzip2 targets are always tar-wrapped.
///
/// # Errors
///
/// Returns [`ArchiveError::SourceNotFound`],
/// [`ArchiveError::UnsupportedFormat`], or any I/O / codec error. A failure
/// part way through leaves a partial archive behind.
///
/// # Examples
///
/// ```no_run
/// use tarc_core::ArchiveConfig;
/// use tarc_core::ArchiveRequest;
/// use tarc_core::NoopProgress;
/// use tarc_core::compress;
///
/// let request = ArchiveRequest::new("/data/reports", "report.zst");
/// let report = compress(&request, &ArchiveConfig::default(), &mut NoopProgress)?;
/// assert_eq!(report.target.to_str(), Some("report.tar.zst"));
/// # Ok::<(), tarc_core::ArchiveError>(())
/// ```
pub fn compress(
    request: &ArchiveRequest,
    config: &ArchiveConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ArchiveReport> {
    if !request.source.exists() {
        return Err(ArchiveError::SourceNotFound {
            path: request.source.clone(),
        });
    }

    let kind = select_kind(&request.target)?;
    let start = Instant::now();
    let canonical = normalize(&request.target)?;
    let manifest = FileManifest::collect(&request.source)?;

    tracing::info!(
        source = %request.source.display(),
        target = %canonical,
        %kind,
        files = manifest.len(),
        bytes = manifest.total_bytes(),
        "archiving"
    );

    let mut report = ArchiveReport::new(canonical.as_path().to_path_buf(), kind);
    let writer = BufWriter::new(File::create(canonical.as_path())?);

    match (kind, manifest.single()) {
        // Single-file zstd archives skip the tar container and draw no
        // progress. Single-file bzip2 archives fall through to tar.
        (CompressionKind::Zstd, Some(entry)) => {
            report.bytes_read = write_bare_stream(
                &entry.path,
                &entry.archive_path,
                writer,
                config.compression_level,
                config.chunk_size,
            )?;
            report.files_added = 1;
            report.bare_stream = true;
        }
        _ => {
            let (files, bytes) = write_tar(kind, writer, &manifest, config, progress)?;
            report.files_added = files;
            report.bytes_read = bytes;
        }
    }

    report.bytes_compressed = fs::metadata(canonical.as_path())?.len();
    report.duration = start.elapsed();
    report.benchmark = request.benchmark.then_some(report.duration);

    tracing::debug!(
        files = report.files_added,
        bytes = report.bytes_compressed,
        bare = report.bare_stream,
        "archive written"
    );

    Ok(report)
}

/// Streams every manifest entry into a compressed tar container.
fn write_tar<W: Write>(
    kind: CompressionKind,
    writer: W,
    manifest: &FileManifest,
    config: &ArchiveConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<(usize, u64)> {
    let encoder = CompressedWriter::new(kind, writer, config.compression_level)?;
    let mut builder = Builder::new(encoder);
    let mut files = 0;
    let mut bytes = 0;

    for entry in track(manifest.entries(), ARCHIVING_LABEL, progress) {
        bytes += append_file(&mut builder, entry, config)?;
        files += 1;
    }

    let encoder = builder.into_inner()?;
    let mut writer = encoder.finish()?;
    writer.flush()?;

    Ok((files, bytes))
}

/// Adds one file to the tar stream under its archive path.
fn append_file<W: Write>(
    builder: &mut Builder<W>,
    entry: &ManifestEntry,
    config: &ArchiveConfig,
) -> Result<u64> {
    let file = File::open(&entry.path)?;
    let metadata = file.metadata()?;
    let size = metadata.len();

    let mut header = Header::new_gnu();
    header.set_metadata_in_mode(&metadata, HeaderMode::Complete);
    if !config.preserve_permissions {
        header.set_mode(0o644);
    }
    header.set_size(size);

    tracing::trace!(path = %entry.archive_path.display(), size, "adding file");
    builder.append_data(&mut header, &entry.archive_path, std::io::Read::take(file, size))?;

    Ok(size)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::progress::NoopProgress;
    use crate::progress::TextProgress;
    use tempfile::TempDir;

    #[test]
    fn test_request_builder() {
        let request = ArchiveRequest::new("src", "out.zst").with_benchmark(true);
        assert_eq!(request.source, PathBuf::from("src"));
        assert_eq!(request.target, "out.zst");
        assert!(request.benchmark);
    }

    #[test]
    fn test_missing_source_checked_before_format() {
        let temp = TempDir::new().unwrap();
        let request = ArchiveRequest::new(temp.path().join("missing"), "out.xyz");
        let err = compress(&request, &ArchiveConfig::default(), &mut NoopProgress).unwrap_err();
        assert!(matches!(err, ArchiveError::SourceNotFound { .. }));
    }

    #[test]
    fn test_unsupported_target_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("x");
        fs::write(&source, b"x").unwrap();
        let target = temp.path().join("out.xyz");

        let request = ArchiveRequest::new(&source, target.to_str().unwrap());
        let err = compress(&request, &ArchiveConfig::default(), &mut NoopProgress).unwrap_err();
        assert!(matches!(err, ArchiveError::UnsupportedFormat { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn test_benchmark_only_when_requested() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("data.txt");
        fs::write(&source, b"data").unwrap();
        let target = temp.path().join("data.bz2");

        let request = ArchiveRequest::new(&source, target.to_str().unwrap());
        let report = compress(&request, &ArchiveConfig::default(), &mut NoopProgress).unwrap();
        assert!(report.benchmark.is_none());

        let report = compress(
            &request.with_benchmark(true),
            &ArchiveConfig::default(),
            &mut NoopProgress,
        )
        .unwrap();
        assert_eq!(report.benchmark, Some(report.duration));
        assert_eq!(report.target, temp.path().join("data.tar.bz2"));
    }

    #[test]
    fn test_single_file_zstd_draws_no_progress() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("data.txt");
        fs::write(&source, b"data").unwrap();
        let target = temp.path().join("data.zst");

        let mut drawn = Vec::new();
        let request = ArchiveRequest::new(&source, target.to_str().unwrap());
        let report = {
            let mut progress = TextProgress::new(&mut drawn);
            compress(&request, &ArchiveConfig::default(), &mut progress).unwrap()
        };
        assert!(report.bare_stream);
        assert!(drawn.is_empty());

        let mut drawn = Vec::new();
        let request = ArchiveRequest::new(&source, temp.path().join("data.bz2").to_str().unwrap());
        {
            let mut progress = TextProgress::new(&mut drawn);
            compress(&request, &ArchiveConfig::default(), &mut progress).unwrap();
        }
        assert!(String::from_utf8(drawn).unwrap().contains("archiving: |"));
    }
}
