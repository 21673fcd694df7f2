//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::create_progress;
use anyhow::Result;
use tarc_core::ExtractConfig;
use tarc_core::ExtractRequest;
use tarc_core::extract;

pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let request = ExtractRequest::new(args.source.as_str(), &args.output_dir)
        .with_benchmark(args.benchmark);
    let config = ExtractConfig::default();

    tracing::debug!(?request, "extract command");

    let mut progress = create_progress(show_progress);
    let report = add_archive_context(
        extract(&request, &config, &mut *progress),
        "extract",
        &args.source,
    )?;
    drop(progress);

    formatter.format_extract_result(&report)
}
