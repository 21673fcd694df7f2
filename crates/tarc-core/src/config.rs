//! Configuration for archive and extract operations.

/// Default chunk size for streaming a single file into a bare zstd stream.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Configuration for archive creation.
///
/// # Examples
///
/// ```
/// use tarc_core::ArchiveConfig;
///
/// let config = ArchiveConfig::default().with_compression_level(9);
/// assert_eq!(config.compression_level, Some(9));
/// assert_eq!(config.chunk_size, 1024 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Compression level (1-9).
    ///
    /// `None` uses the codec default.
    ///
    /// Default: `Some(6)` (balanced).
    pub compression_level: Option<u8>,

    /// Chunk size in bytes used for the single-file zstd stream.
    ///
    /// Default: 1 MiB.
    pub chunk_size: usize,

    /// Store file permission bits in tar headers.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression_level: Some(6),
            chunk_size: DEFAULT_CHUNK_SIZE,
            preserve_permissions: true,
        }
    }
}

impl ArchiveConfig {
    /// Creates a new `ArchiveConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level, clamped to 1-9.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level.clamp(1, 9));
        self
    }

    /// Sets the streaming chunk size (at least one byte).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Sets whether permission bits are stored.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }
}

/// Configuration for archive extraction.
///
/// # Examples
///
/// ```
/// use tarc_core::ExtractConfig;
///
/// let config = ExtractConfig::default().with_preserve_mtime(false);
/// assert!(config.preserve_permissions);
/// assert!(!config.preserve_mtime);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Apply permission bits stored in the archive.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,

    /// Apply modification times stored in the archive.
    ///
    /// Default: `true`.
    pub preserve_mtime: bool,

    /// Replace existing files in the output directory.
    ///
    /// Default: `true`.
    pub overwrite: bool,

    /// Chunk size in bytes used when decompressing a single-file zstd stream.
    ///
    /// Default: 1 MiB.
    pub chunk_size: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            preserve_permissions: true,
            preserve_mtime: true,
            overwrite: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ExtractConfig {
    /// Creates a new `ExtractConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether stored permissions are applied.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Sets whether stored modification times are applied.
    #[must_use]
    pub fn with_preserve_mtime(mut self, preserve: bool) -> Self {
        self.preserve_mtime = preserve;
        self
    }

    /// Sets whether existing files are replaced.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_config_defaults() {
        let config = ArchiveConfig::default();
        assert_eq!(config.compression_level, Some(6));
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(config.preserve_permissions);
    }

    #[test]
    fn test_compression_level_clamped() {
        assert_eq!(
            ArchiveConfig::new().with_compression_level(0).compression_level,
            Some(1)
        );
        assert_eq!(
            ArchiveConfig::new().with_compression_level(42).compression_level,
            Some(9)
        );
    }

    #[test]
    fn test_chunk_size_never_zero() {
        assert_eq!(ArchiveConfig::new().with_chunk_size(0).chunk_size, 1);
    }

    #[test]
    fn test_extract_config_builder() {
        let config = ExtractConfig::new()
            .with_preserve_permissions(false)
            .with_overwrite(false);
        assert!(!config.preserve_permissions);
        assert!(!config.overwrite);
        assert!(config.preserve_mtime);
    }
}
