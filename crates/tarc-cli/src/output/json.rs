//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io;
use std::io::Write;
use tarc_core::ArchiveReport;
use tarc_core::ExtractReport;

pub struct JsonFormatter;

impl JsonFormatter {
    pub fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ArchiveOutput {
    target: String,
    format: &'static str,
    bare_stream: bool,
    files_added: usize,
    bytes_read: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    duration_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    benchmark_secs: Option<f64>,
}

#[derive(Serialize)]
struct ExtractOutput {
    archive: String,
    format: &'static str,
    output_dir: String,
    bare_stream: bool,
    members_extracted: usize,
    members_skipped: usize,
    duration_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    benchmark_secs: Option<f64>,
}

impl OutputFormatter for JsonFormatter {
    fn format_archive_result(&self, report: &ArchiveReport) -> Result<()> {
        let data = ArchiveOutput {
            target: report.target.display().to_string(),
            format: report.kind.name(),
            bare_stream: report.bare_stream,
            files_added: report.files_added,
            bytes_read: report.bytes_read,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
            benchmark_secs: report.benchmark.map(|d| d.as_secs_f64()),
        };

        Self::output(&JsonOutput::success("archive", data))
    }

    fn format_extract_result(&self, report: &ExtractReport) -> Result<()> {
        let data = ExtractOutput {
            archive: report.archive.display().to_string(),
            format: report.kind.name(),
            output_dir: report.output_dir.display().to_string(),
            bare_stream: report.bare_stream,
            members_extracted: report.members_extracted,
            members_skipped: report.members_skipped,
            duration_ms: report.duration.as_millis(),
            benchmark_secs: report.benchmark.map(|d| d.as_secs_f64()),
        };

        Self::output(&JsonOutput::success("extract", data))
    }
}
