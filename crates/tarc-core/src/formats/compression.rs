//! Compression kinds supported for archives.
//!
//! Exactly two codecs are recognized, each identified by a bare suffix and a
//! tar-tagged full suffix:
//!
//! - **Zstd** (`.zst`, `.tar.zst`): fast modern codec
//! - **Bzip2** (`.bz2`, `.tar.bz2`): classic block-sorting codec

/// Compression codec applied to an archive.
///
/// # Examples
///
/// ```
/// use tarc_core::CompressionKind;
///
/// assert_eq!(CompressionKind::Zstd.extension(), ".tar.zst");
/// assert_eq!(CompressionKind::Bzip2.bare_extension(), ".bz2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionKind {
    /// Zstandard compression.
    ///
    /// Single-file sources are written as a bare zstd stream without a tar
    /// container.
    Zstd,

    /// Bzip2 compression (Burrows-Wheeler algorithm).
    ///
    /// Always wrapped in a tar container.
    Bzip2,
}

impl CompressionKind {
    /// All supported kinds, in suffix-matching order.
    pub const ALL: [Self; 2] = [Self::Zstd, Self::Bzip2];

    /// Returns the full tar-tagged suffix for this kind.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Zstd => ".tar.zst",
            Self::Bzip2 => ".tar.bz2",
        }
    }

    /// Returns the bare shorthand suffix for this kind.
    #[must_use]
    pub const fn bare_extension(self) -> &'static str {
        match self {
            Self::Zstd => ".zst",
            Self::Bzip2 => ".bz2",
        }
    }

    /// Returns a human-readable codec name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zstd => "zstd",
            Self::Bzip2 => "bzip2",
        }
    }
}

impl std::fmt::Display for CompressionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
