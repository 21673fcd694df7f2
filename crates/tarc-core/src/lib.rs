//! Streaming `.tar.zst` / `.tar.bz2` archive creation and extraction.
//!
//! `tarc-core` archives a file or directory tree into a compressed tar
//! stream and extracts such archives again. Archive names are normalized to
//! one of two canonical suffixes, and the suffix alone selects the codec.
//!
//! # Examples
//!
//! ```no_run
//! use tarc_core::ArchiveConfig;
//! use tarc_core::ArchiveRequest;
//! use tarc_core::ExtractConfig;
//! use tarc_core::ExtractRequest;
//! use tarc_core::NoopProgress;
//! use tarc_core::compress;
//! use tarc_core::extract;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = ArchiveRequest::new("/data/reports", "report.zst");
//! let report = compress(&request, &ArchiveConfig::default(), &mut NoopProgress)?;
//! println!("wrote {}", report.target.display());
//!
//! let request = ExtractRequest::new("report.tar.zst", "/tmp/out");
//! let report = extract(&request, &ExtractConfig::default(), &mut NoopProgress)?;
//! println!("extracted {} members", report.members_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod error;
pub mod extract;
pub mod formats;
pub mod manifest;
pub mod progress;
pub mod report;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export main API types
pub use archive::ArchiveRequest;
pub use archive::compress;
pub use config::ArchiveConfig;
pub use config::ExtractConfig;
pub use error::ArchiveError;
pub use error::Result;
pub use extract::ExtractRequest;
pub use extract::Member;
pub use extract::MemberKind;
pub use extract::extract;
pub use extract::list_members;
pub use formats::compression::CompressionKind;
pub use formats::detect::CanonicalName;
pub use formats::detect::normalize;
pub use formats::detect::select_kind;
pub use manifest::FileManifest;
pub use manifest::ManifestEntry;
pub use progress::NoopProgress;
pub use progress::ProgressCallback;
pub use progress::TextProgress;
pub use report::ArchiveReport;
pub use report::ExtractReport;
