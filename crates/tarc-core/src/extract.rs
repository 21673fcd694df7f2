//! Extract pipeline: `.tar.zst` / `.tar.bz2` to an output directory.

use crate::ArchiveError;
use crate::Result;
use crate::config::ExtractConfig;
use crate::formats::bare::extract_bare_stream;
use crate::formats::bare::read_name_frame;
use crate::formats::codec::CompressedReader;
use crate::formats::compression::CompressionKind;
use crate::formats::detect::normalize;
use crate::progress::ProgressCallback;
use crate::progress::track;
use crate::report::ExtractReport;
use std::fs;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

/// Progress label used while extracting members.
pub const EXTRACTING_LABEL: &str = "extracting";

/// A request to extract `archive` into `output_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRequest {
    /// Archive name as supplied by the user (normalized before lookup).
    pub archive: String,
    /// Directory to extract into; created if missing.
    pub output_dir: PathBuf,
    /// Report elapsed time.
    pub benchmark: bool,
}

impl ExtractRequest {
    /// Creates a request without benchmarking.
    pub fn new(archive: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
            output_dir: output_dir.into(),
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

/// Kind of an archive member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Hard link.
    Hardlink,
    /// Any other tar entry type (devices, fifos, ...).
    Other,
}

impl From<tar::EntryType> for MemberKind {
    fn from(entry_type: tar::EntryType) -> Self {
        match entry_type {
            tar::EntryType::Regular | tar::EntryType::Continuous | tar::EntryType::GNUSparse => {
                Self::File
            }
            tar::EntryType::Directory => Self::Directory,
            tar::EntryType::Symlink => Self::Symlink,
            tar::EntryType::Link => Self::Hardlink,
            _ => Self::Other,
        }
    }
}

/// One archive member, as listed before extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Path stored in the archive.
    pub path: PathBuf,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Entry type.
    pub kind: MemberKind,
}

/// Extracts `request.archive` into `request.output_dir`.
///
/// Steps, in order:
///
/// 1. normalize the archive name into its canonical form
/// 2. fail with [`ArchiveError::ArchiveNotFound`] if the canonical path is
///    missing (the output directory is left untouched)
/// 3. take the compression kind from the canonical suffix
/// 4. start the timer and create the output directory
/// 5. list every member, then extract them in archive order
///
/// Members are unpacked with their relative paths and stored metadata.
/// Members that would land outside the output directory are skipped.
///
/// # Errors
///
/// Returns [`ArchiveError::UnsupportedFormat`],
/// [`ArchiveError::ArchiveNotFound`], [`ArchiveError::InvalidArchive`], or
/// any I/O / codec error. Output written before a failure is left in place.
pub fn extract(
    request: &ExtractRequest,
    config: &ExtractConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractReport> {
    let canonical = normalize(&request.archive)?;
    if !canonical.as_path().exists() {
        return Err(ArchiveError::ArchiveNotFound {
            path: canonical.into_path_buf(),
        });
    }

    let kind = canonical.kind();
    let start = Instant::now();
    fs::create_dir_all(&request.output_dir)?;

    tracing::info!(
        archive = %canonical,
        %kind,
        output = %request.output_dir.display(),
        "extracting"
    );

    let mut report = ExtractReport::new(
        canonical.as_path().to_path_buf(),
        kind,
        request.output_dir.clone(),
    );
    let mut reader = BufReader::new(File::open(canonical.as_path())?);

    let bare_name = match kind {
        CompressionKind::Zstd => read_name_frame(&mut reader)?,
        CompressionKind::Bzip2 => None,
    };

    if let Some(name) = bare_name {
        tracing::debug!(name = %name.display(), "bare zstd stream");
        for name in track([name], EXTRACTING_LABEL, progress) {
            let output = request.output_dir.join(name);
            if !config.overwrite && output.exists() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists", output.display()),
                )
                .into());
            }
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)?;
            }
            extract_bare_stream(&mut reader, &output, config.chunk_size)?;
            report.members_extracted += 1;
        }
        report.bare_stream = true;
    } else {
        let members = list_members(canonical.as_path(), kind)?;
        tracing::debug!(members = members.len(), "listed archive members");
        unpack_members(reader, kind, &members, &request.output_dir, config, progress, &mut report)?;
    }

    report.duration = start.elapsed();
    report.benchmark = request.benchmark.then_some(report.duration);

    Ok(report)
}

/// Lists the members of a canonical archive without extracting them.
///
/// A bare zstd stream lists as one file member named by its name frame.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidArchive`] if the container cannot be read,
/// or an I/O / codec error.
pub fn list_members(path: &Path, kind: CompressionKind) -> Result<Vec<Member>> {
    let mut reader = BufReader::new(File::open(path)?);

    if kind == CompressionKind::Zstd
        && let Some(name) = read_name_frame(&mut reader)?
    {
        let mut decoder = CompressedReader::new(kind, reader)?;
        let size = io::copy(&mut decoder, &mut io::sink())?;
        return Ok(vec![Member {
            path: name,
            size,
            kind: MemberKind::File,
        }]);
    }

    let mut archive = tar::Archive::new(CompressedReader::new(kind, reader)?);
    let entries = archive
        .entries()
        .map_err(|e| ArchiveError::InvalidArchive(format!("failed to read TAR entries: {e}")))?;

    let mut members = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| ArchiveError::InvalidArchive(format!("failed to read TAR entry: {e}")))?;
        let header = entry.header();
        members.push(Member {
            path: entry
                .path()
                .map_err(|e| ArchiveError::InvalidArchive(format!("invalid entry path: {e}")))?
                .into_owned(),
            size: header.size()?,
            kind: header.entry_type().into(),
        });
    }

    Ok(members)
}

fn unpack_members(
    reader: BufReader<File>,
    kind: CompressionKind,
    members: &[Member],
    output_dir: &Path,
    config: &ExtractConfig,
    progress: &mut dyn ProgressCallback,
    report: &mut ExtractReport,
) -> Result<()> {
    let mut archive = tar::Archive::new(CompressedReader::new(kind, reader)?);
    archive.set_preserve_permissions(config.preserve_permissions);
    archive.set_preserve_mtime(config.preserve_mtime);
    archive.set_overwrite(config.overwrite);

    let mut entries = archive
        .entries()
        .map_err(|e| ArchiveError::InvalidArchive(format!("failed to read TAR entries: {e}")))?;

    for member in track(members, EXTRACTING_LABEL, progress) {
        let mut entry = entries
            .next()
            .ok_or_else(|| {
                ArchiveError::InvalidArchive(format!(
                    "archive ended before member {}",
                    member.path.display()
                ))
            })?
            .map_err(|e| ArchiveError::InvalidArchive(format!("failed to read TAR entry: {e}")))?;

        if entry.unpack_in(output_dir)? {
            report.members_extracted += 1;
        } else {
            tracing::warn!(
                path = %member.path.display(),
                "skipped member outside output directory"
            );
            report.members_skipped += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::progress::NoopProgress;
    use crate::test_utils::write_tar_archive;
    use tempfile::TempDir;

    #[test]
    fn test_missing_archive_leaves_output_untouched() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let archive = temp.path().join("missing.tar.zst");

        let request = ExtractRequest::new(archive.to_str().unwrap(), &out);
        let err = extract(&request, &ExtractConfig::default(), &mut NoopProgress).unwrap_err();
        assert!(matches!(err, ArchiveError::ArchiveNotFound { ref path } if *path == archive));
        assert!(!out.exists());
    }

    #[test]
    fn test_archive_name_normalized_before_lookup() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("data.tar.bz2");
        write_tar_archive(&archive, CompressionKind::Bzip2, &[("data/a.txt", "a")]);

        let shorthand = temp.path().join("data.bz2");
        let out = temp.path().join("out");
        let request = ExtractRequest::new(shorthand.to_str().unwrap(), &out);
        let report = extract(&request, &ExtractConfig::default(), &mut NoopProgress).unwrap();

        assert_eq!(report.archive, archive);
        assert_eq!(report.members_extracted, 1);
        assert_eq!(fs::read(out.join("data/a.txt")).unwrap(), b"a");
    }

    #[test]
    fn test_list_members_in_archive_order() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("order.tar.zst");
        write_tar_archive(
            &archive,
            CompressionKind::Zstd,
            &[("z.txt", "zz"), ("a.txt", "a"), ("m/n.txt", "nnn")],
        );

        let members = list_members(&archive, CompressionKind::Zstd).unwrap();
        let paths: Vec<_> = members.iter().map(|m| m.path.clone()).collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("z.txt"),
                PathBuf::from("a.txt"),
                PathBuf::from("m/n.txt")
            ]
        );
        assert_eq!(members[2].size, 3);
        assert_eq!(members[0].kind, MemberKind::File);
    }

    #[test]
    fn test_corrupt_archive_is_invalid() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("broken.tar.bz2");
        fs::write(&archive, b"definitely not bzip2").unwrap();

        let out = temp.path().join("out");
        let request = ExtractRequest::new(archive.to_str().unwrap(), &out);
        assert!(extract(&request, &ExtractConfig::default(), &mut NoopProgress).is_err());
    }

    #[test]
    fn test_member_kind_from_entry_type() {
        assert_eq!(MemberKind::from(tar::EntryType::Regular), MemberKind::File);
        assert_eq!(
            MemberKind::from(tar::EntryType::Directory),
            MemberKind::Directory
        );
        assert_eq!(MemberKind::from(tar::EntryType::Symlink), MemberKind::Symlink);
        assert_eq!(MemberKind::from(tar::EntryType::Link), MemberKind::Hardlink);
        assert_eq!(MemberKind::from(tar::EntryType::Fifo), MemberKind::Other);
    }
}
