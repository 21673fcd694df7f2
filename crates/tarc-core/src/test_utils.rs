//! Test utilities for building compressed tar archives.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use crate::formats::codec::CompressedWriter;
use crate::formats::compression::CompressionKind;
use std::fs::File;
use std::path::Path;

/// Creates an in-memory TAR archive from a list of entries.
///
/// Each entry is a tuple of (path, text content). Files are created with mode
/// 0o644.
#[must_use]
pub fn create_test_tar(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut ar = tar::Builder::new(Vec::new());
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        ar.append_data(&mut header, path, data.as_bytes()).unwrap();
    }
    ar.into_inner().unwrap()
}

/// Writes a compressed TAR archive with the given entries to `path`.
pub fn write_tar_archive(path: &Path, kind: CompressionKind, entries: &[(&str, &str)]) {
    let tar_data = create_test_tar(entries);
    let mut writer = CompressedWriter::new(kind, File::create(path).unwrap(), None).unwrap();
    std::io::Write::write_all(&mut writer, &tar_data).unwrap();
    writer.finish().unwrap();
}
