//! Single-file zstd streams written without a tar container.
//!
//! A bare stream is one zstd skippable frame carrying the file's relative path,
//! followed by the compressed file contents. Standard zstd decoders skip the
//! name frame, so `zstd -d` still restores the raw bytes.
//!
//! Frame layout (all integers little-endian):
//!
//! ```text
//! +------------+------------+-------------------+------------------+
//! | magic u32  | length u32 | name (raw bytes)  | zstd frame(s)... |
//! +------------+------------+-------------------+------------------+
//! ```

use crate::ArchiveError;
use crate::Result;
use crate::formats::codec::CompressedReader;
use crate::formats::codec::CompressedWriter;
use crate::formats::compression::CompressionKind;
use std::fs::File;
use std::io::BufRead;
use std::io::Read;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Skippable frame magic used for the name frame.
pub const NAME_FRAME_MAGIC: u32 = 0x184D_2A5A;

const MAX_NAME_LEN: u32 = 4096;

/// Writes `source` to `target` as a bare zstd stream named `name`.
///
/// `name` is the relative path the file is restored under. Contents are
/// copied in `chunk_size` chunks. Returns the number of uncompressed bytes
/// read from `source`.
///
/// # Errors
///
/// Returns an error if the name is not a relative path of normal
/// components, or on any I/O or codec failure.
pub fn write_bare_stream<W: Write>(
    source: &Path,
    name: &Path,
    mut target: W,
    level: Option<u8>,
    chunk_size: usize,
) -> Result<u64> {
    validate_name(name)?;
    let encoded = name_to_bytes(name)?;
    let len = u32::try_from(encoded.len())
        .ok()
        .filter(|len| *len <= MAX_NAME_LEN)
        .ok_or_else(|| {
            ArchiveError::InvalidArchive(format!("name too long: {}", name.display()))
        })?;

    target.write_all(&NAME_FRAME_MAGIC.to_le_bytes())?;
    target.write_all(&len.to_le_bytes())?;
    target.write_all(&encoded)?;

    let mut input = File::open(source)?;
    let mut encoder = CompressedWriter::new(CompressionKind::Zstd, target, level)?;
    let bytes = copy_chunked(&mut input, &mut encoder, chunk_size)?;

    let mut target = encoder.finish()?;
    target.flush()?;

    tracing::debug!(name = %name.display(), bytes, "wrote bare zstd stream");
    Ok(bytes)
}

/// Reads the name frame at the start of `reader`, if present.
///
/// Returns `Ok(None)` without consuming anything when the stream does not
/// start with a name frame (i.e. it is a tar stream).
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidArchive`] if the frame is truncated or too
/// long, or if it names anything other than a relative path of normal
/// components.
pub fn read_name_frame<R: BufRead>(reader: &mut R) -> Result<Option<PathBuf>> {
    let head = reader.fill_buf()?;
    if head.len() < 4 || head[..4] != NAME_FRAME_MAGIC.to_le_bytes() {
        return Ok(None);
    }
    reader.consume(4);

    let mut len = [0u8; 4];
    reader
        .read_exact(&mut len)
        .map_err(|e| ArchiveError::InvalidArchive(format!("truncated name frame: {e}")))?;
    let len = u32::from_le_bytes(len);
    if len > MAX_NAME_LEN {
        return Err(ArchiveError::InvalidArchive(format!(
            "name frame too long: {len} bytes"
        )));
    }

    let mut name = vec![0u8; len as usize];
    reader
        .read_exact(&mut name)
        .map_err(|e| ArchiveError::InvalidArchive(format!("truncated name frame: {e}")))?;
    let name = name_from_bytes(name)?;

    validate_name(&name)?;
    Ok(Some(name))
}

/// Decompresses the remainder of a bare stream into `output`.
///
/// `reader` must be positioned just after the name frame. Returns the number
/// of bytes written.
///
/// # Errors
///
/// Returns an error on any I/O or codec failure.
pub fn extract_bare_stream<R: BufRead>(reader: R, output: &Path, chunk_size: usize) -> Result<u64> {
    let mut decoder = CompressedReader::new(CompressionKind::Zstd, reader)?;
    let mut file = File::create(output)?;
    let bytes = copy_chunked(&mut decoder, &mut file, chunk_size)?;
    file.flush()?;
    Ok(bytes)
}

fn copy_chunked<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    chunk_size: usize,
) -> Result<u64> {
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n])?;
        total += n as u64;
    }
    Ok(total)
}

/// Accepts one or more normal components and nothing else.
fn validate_name(name: &Path) -> Result<()> {
    let mut components = name.components().peekable();
    if components.peek().is_some()
        && components.all(|component| matches!(component, Component::Normal(_)))
    {
        Ok(())
    } else {
        Err(ArchiveError::InvalidArchive(format!(
            "bare stream name is not a relative path: {}",
            name.display()
        )))
    }
}

/// Encodes a validated name as `/`-separated raw bytes.
#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn name_to_bytes(name: &Path) -> Result<Vec<u8>> {
    use std::os::unix::ffi::OsStrExt;

    let mut bytes = Vec::new();
    for (i, component) in name.components().enumerate() {
        if i > 0 {
            bytes.push(b'/');
        }
        bytes.extend_from_slice(component.as_os_str().as_bytes());
    }
    Ok(bytes)
}

#[cfg(not(unix))]
fn name_to_bytes(name: &Path) -> Result<Vec<u8>> {
    let parts = name
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| {
            ArchiveError::InvalidArchive(format!("name is not valid UTF-8: {}", name.display()))
        })?;
    Ok(parts.join("/").into_bytes())
}

#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn name_from_bytes(bytes: Vec<u8>) -> Result<PathBuf> {
    use std::os::unix::ffi::OsStringExt;

    Ok(PathBuf::from(std::ffi::OsString::from_vec(bytes)))
}

#[cfg(not(unix))]
fn name_from_bytes(bytes: Vec<u8>) -> Result<PathBuf> {
    String::from_utf8(bytes)
        .map(PathBuf::from)
        .map_err(|_| ArchiveError::InvalidArchive("name frame is not valid UTF-8".into()))
}
