//! Stream wrappers for the two compression codecs.
//!
//! [`CompressedWriter`] and [`CompressedReader`] hide the codec behind one
//! `Write` / `Read` type so the tar container code stays codec-agnostic.
//!
//! # Level Mapping
//!
//! User levels follow a consistent 1-9 scale:
//!
//! - **1-3**: Fast compression
//! - **6**: Default compression (balanced)
//! - **7-9**: Best compression
//!
//! Each codec maps these levels to its own internal scale.

use crate::formats::compression::CompressionKind;
use std::io;
use std::io::BufRead;
use std::io::Read;
use std::io::Write;

/// Converts user compression level (1-9) to bzip2 compression level.
///
/// # Examples
///
/// ```
/// use tarc_core::formats::codec::compression_level_to_bzip2;
///
/// assert_eq!(compression_level_to_bzip2(Some(9)), bzip2::Compression::best());
/// ```
#[must_use]
pub fn compression_level_to_bzip2(level: Option<u8>) -> bzip2::Compression {
    match level {
        None | Some(6) => bzip2::Compression::default(),
        Some(1) => bzip2::Compression::fast(),
        Some(7..=9) => bzip2::Compression::best(),
        Some(n @ 2..=5) => bzip2::Compression::new(u32::from(n)),
        Some(n) => bzip2::Compression::new(u32::from(n.clamp(1, 9))),
    }
}

/// Converts user compression level (1-9) to zstd compression level.
///
/// Zstd has a wider range (1-22) than the user scale, so levels map to
/// strategic points:
///
/// - `None` or `Some(3..=6)`: Level 3 (zstd default)
/// - `1`, `2`: Levels 1 and 2
/// - `7`, `8`, `9`: Levels 10, 15, 19
///
/// # Examples
///
/// ```
/// use tarc_core::formats::codec::compression_level_to_zstd;
///
/// assert_eq!(compression_level_to_zstd(None), 3);
/// assert_eq!(compression_level_to_zstd(Some(9)), 19);
/// ```
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn compression_level_to_zstd(level: Option<u8>) -> i32 {
    match level {
        Some(1) => 1,
        Some(2) => 2,
        Some(7) => 10,
        Some(8) => 15,
        Some(9) => 19,
        _ => 3,
    }
}

/// Compressing writer for either supported codec.
///
/// Call [`finish`](Self::finish) to write the codec trailer. Dropping the
/// writer without finishing leaves a truncated stream.
pub enum CompressedWriter<W: Write> {
    /// Zstandard encoder.
    Zstd(zstd::Encoder<'static, W>),
    /// Bzip2 encoder.
    Bzip2(bzip2::write::BzEncoder<W>),
}

impl<W: Write> CompressedWriter<W> {
    /// Wraps `inner` in an encoder for `kind` at the given user level.
    ///
    /// # Errors
    ///
    /// Returns an error if the zstd encoder cannot be initialised.
    pub fn new(kind: CompressionKind, inner: W, level: Option<u8>) -> io::Result<Self> {
        match kind {
            CompressionKind::Zstd => {
                let mut encoder = zstd::Encoder::new(inner, compression_level_to_zstd(level))?;
                encoder.include_checksum(true)?;
                Ok(Self::Zstd(encoder))
            }
            CompressionKind::Bzip2 => Ok(Self::Bzip2(bzip2::write::BzEncoder::new(
                inner,
                compression_level_to_bzip2(level),
            ))),
        }
    }

    /// Returns the codec this writer compresses with.
    #[must_use]
    pub const fn kind(&self) -> CompressionKind {
        match self {
            Self::Zstd(_) => CompressionKind::Zstd,
            Self::Bzip2(_) => CompressionKind::Bzip2,
        }
    }

    /// Flushes remaining compressed data and returns the inner writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the trailer fails.
    pub fn finish(self) -> io::Result<W> {
        match self {
            Self::Zstd(encoder) => encoder.finish(),
            Self::Bzip2(encoder) => encoder.finish(),
        }
    }
}

impl<W: Write> Write for CompressedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Zstd(encoder) => encoder.write(buf),
            Self::Bzip2(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Zstd(encoder) => encoder.flush(),
            Self::Bzip2(encoder) => encoder.flush(),
        }
    }
}

/// Decompressing reader for either supported codec.
pub enum CompressedReader<R: BufRead> {
    /// Zstandard decoder.
    Zstd(zstd::Decoder<'static, R>),
    /// Bzip2 decoder (handles multi-stream files).
    Bzip2(bzip2::bufread::MultiBzDecoder<R>),
}

impl<R: BufRead> CompressedReader<R> {
    /// Wraps `inner` in a decoder for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the zstd decoder cannot be initialised.
    pub fn new(kind: CompressionKind, inner: R) -> io::Result<Self> {
        match kind {
            CompressionKind::Zstd => Ok(Self::Zstd(zstd::Decoder::with_buffer(inner)?)),
            CompressionKind::Bzip2 => Ok(Self::Bzip2(bzip2::bufread::MultiBzDecoder::new(inner))),
        }
    }
}

impl<R: BufRead> Read for CompressedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Zstd(decoder) => decoder.read(buf),
            Self::Bzip2(decoder) => decoder.read(buf),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_compression_level_to_bzip2() {
        assert_eq!(compression_level_to_bzip2(None), bzip2::Compression::default());
        assert_eq!(compression_level_to_bzip2(Some(1)), bzip2::Compression::fast());
        assert_eq!(compression_level_to_bzip2(Some(9)), bzip2::Compression::best());
        assert_eq!(compression_level_to_bzip2(Some(4)), bzip2::Compression::new(4));
    }

    #[test]
    fn test_compression_level_to_zstd() {
        assert_eq!(compression_level_to_zstd(None), 3);
        assert_eq!(compression_level_to_zstd(Some(6)), 3);
        assert_eq!(compression_level_to_zstd(Some(1)), 1);
        assert_eq!(compression_level_to_zstd(Some(7)), 10);
        assert_eq!(compression_level_to_zstd(Some(9)), 19);
    }

    #[test]
    fn test_writer_reports_kind() {
        for kind in CompressionKind::ALL {
            let writer = CompressedWriter::new(kind, Vec::new(), None).unwrap();
            assert_eq!(writer.kind(), kind);
        }
    }

    #[test]
    fn test_codec_streams_interoperate() {
        let payload = b"tarc codec payload ".repeat(512);
        for kind in CompressionKind::ALL {
            let mut writer = CompressedWriter::new(kind, Vec::new(), Some(9)).unwrap();
            writer.write_all(&payload).unwrap();
            let compressed = writer.finish().unwrap();
            assert!(compressed.len() < payload.len(), "{kind} did not compress");

            let mut reader = CompressedReader::new(kind, Cursor::new(compressed)).unwrap();
            let mut out = Vec::new();
            reader.read_to_end(&mut out).unwrap();
            assert_eq!(out, payload);
        }
    }
}
