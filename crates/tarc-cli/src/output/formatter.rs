//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::time::Duration;
use tarc_core::ArchiveReport;
use tarc_core::ExtractReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format archive result
    fn format_archive_result(&self, report: &ArchiveReport) -> Result<()>;

    /// Format extract result
    fn format_extract_result(&self, report: &ExtractReport) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// The timing line printed for `--benchmark`.
pub fn benchmark_line(action: &str, elapsed: Duration) -> String {
    format!("{action} took {:.2} seconds.", elapsed.as_secs_f64())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_line() {
        assert_eq!(
            benchmark_line("Archiving", Duration::from_millis(1234)),
            "Archiving took 1.23 seconds."
        );
        assert_eq!(
            benchmark_line("Extracting", Duration::ZERO),
            "Extracting took 0.00 seconds."
        );
    }

    #[test]
    fn test_json_output_success_shape() {
        let output = JsonOutput::success("archive", 3);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["operation"], "archive");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], 3);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_json_output_error_shape() {
        let output = JsonOutput::<()>::error("extract", "archive not found");
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "archive not found");
        assert!(json.get("data").is_none());
    }
}
