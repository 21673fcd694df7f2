//! Archive command implementation.

use crate::cli::ArchiveArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::create_progress;
use anyhow::Result;
use tarc_core::ArchiveConfig;
use tarc_core::ArchiveRequest;
use tarc_core::compress;

pub fn execute(
    args: &ArchiveArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let request =
        ArchiveRequest::new(&args.source, args.target.as_str()).with_benchmark(args.benchmark);

    let mut config = ArchiveConfig::default();
    if let Some(level) = args.compression_level {
        config = config.with_compression_level(level);
    }

    tracing::debug!(?request, ?config, "archive command");

    let mut progress = create_progress(show_progress);
    let report = add_archive_context(
        compress(&request, &config, &mut *progress),
        "archive",
        &args.target,
    )?;
    drop(progress);

    formatter.format_archive_result(&report)
}
