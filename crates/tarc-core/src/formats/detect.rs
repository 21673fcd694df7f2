//! Archive name normalization and compression kind selection.
//!
//! Both operations are pure functions over the name as typed by the user.
//! Suffix comparison is case-insensitive and the canonical file name is
//! lower-cased. Parent directories keep their original case.

use crate::ArchiveError;
use crate::Result;
use crate::formats::compression::CompressionKind;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;

/// An archive path whose file name ends in `.tar.zst` or `.tar.bz2`.
///
/// Only [`normalize`] constructs values of this type, so every
/// `CanonicalName` maps to exactly one [`CompressionKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalName {
    path: PathBuf,
    kind: CompressionKind,
}

impl CanonicalName {
    /// Returns the canonical path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Returns the compression kind implied by the canonical suffix.
    #[must_use]
    pub const fn kind(&self) -> CompressionKind {
        self.kind
    }

    /// Consumes the name and returns the owned path.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for CanonicalName {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Selects the compression kind from the bare suffix of `name`.
///
/// # Errors
///
/// Returns [`ArchiveError::UnsupportedFormat`] if the name ends in neither
/// `.zst` nor `.bz2`.
///
/// # Examples
///
/// ```
/// use tarc_core::CompressionKind;
/// use tarc_core::formats::detect::select_kind;
///
/// assert_eq!(select_kind("report.ZST").unwrap(), CompressionKind::Zstd);
/// assert_eq!(select_kind("backup.tar.bz2").unwrap(), CompressionKind::Bzip2);
/// assert!(select_kind("out.xyz").is_err());
/// ```
pub fn select_kind(name: &str) -> Result<CompressionKind> {
    let lower = name.to_lowercase();
    CompressionKind::ALL
        .into_iter()
        .find(|kind| lower.ends_with(kind.bare_extension()))
        .ok_or_else(|| ArchiveError::unsupported(name))
}

/// Rewrites `name` into its canonical `.tar.zst` / `.tar.bz2` form.
///
/// - A name already ending in a full suffix is kept (lower-cased).
/// - A bare `.zst` / `.bz2` suffix is replaced by the full suffix.
///
/// # Errors
///
/// Returns [`ArchiveError::UnsupportedFormat`] if no recognized suffix is
/// present. Unknown suffixes never fall back to a default kind.
///
/// # Examples
///
/// ```
/// use tarc_core::formats::detect::normalize;
///
/// assert_eq!(normalize("report.zst").unwrap().to_string(), "report.tar.zst");
/// assert_eq!(normalize("Logs.TAR.BZ2").unwrap().to_string(), "logs.tar.bz2");
/// assert!(normalize("out.tar").is_err());
/// ```
pub fn normalize(name: &str) -> Result<CanonicalName> {
    let (dir, file) = match name.rfind(std::path::is_separator) {
        Some(idx) => name.split_at(idx + 1),
        None => ("", name),
    };
    let file = file.to_lowercase();

    let canonical = CompressionKind::ALL
        .into_iter()
        .find(|kind| file.ends_with(kind.extension()))
        .map(|kind| (file.clone(), kind))
        .or_else(|| {
            CompressionKind::ALL.into_iter().find_map(|kind| {
                file.strip_suffix(kind.bare_extension())
                    .map(|stem| (format!("{stem}{}", kind.extension()), kind))
            })
        });

    let Some((file, kind)) = canonical else {
        return Err(ArchiveError::unsupported(name));
    };

    Ok(CanonicalName {
        path: PathBuf::from(format!("{dir}{file}")),
        kind,
    })
}
