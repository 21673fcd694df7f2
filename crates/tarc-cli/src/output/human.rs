//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use super::formatter::benchmark_line;
use anyhow::Result;
use console::Term;
use console::style;
use tarc_core::ArchiveReport;
use tarc_core::ExtractReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn headline(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_archive_result(&self, report: &ArchiveReport) -> Result<()> {
        if !self.quiet {
            self.headline(&format!("Archive created: {}", report.target.display()));

            let _ = self
                .term
                .write_line(&format!("  Files added:      {}", report.files_added));
            let _ = self.term.write_line(&format!(
                "  Total size:       {}",
                Self::format_size(report.bytes_read)
            ));
            let _ = self.term.write_line(&format!(
                "  Compressed size:  {}",
                Self::format_size(report.bytes_compressed)
            ));

            if self.verbose {
                let layout = if report.bare_stream {
                    "bare stream"
                } else {
                    "tar"
                };
                let _ = self
                    .term
                    .write_line(&format!("  Format:           {} ({layout})", report.kind));
                let _ = self.term.write_line(&format!(
                    "  Compression:      {:.1}%",
                    report.compression_percentage()
                ));
            }
        }

        if let Some(elapsed) = report.benchmark {
            let _ = self.term.write_line(&benchmark_line("Archiving", elapsed));
        }

        Ok(())
    }

    fn format_extract_result(&self, report: &ExtractReport) -> Result<()> {
        if !self.quiet {
            self.headline(&format!(
                "Extracted {} into {}",
                report.archive.display(),
                report.output_dir.display()
            ));

            let _ = self
                .term
                .write_line(&format!("  Members extracted: {}", report.members_extracted));

            if report.members_skipped > 0 {
                let _ = self
                    .term
                    .write_line(&format!("  Members skipped:   {}", report.members_skipped));
            }

            if self.verbose {
                let _ = self
                    .term
                    .write_line(&format!("  Format:            {}", report.kind));
                let _ = self
                    .term
                    .write_line(&format!("  Duration:          {:?}", report.duration));
            }
        }

        if let Some(elapsed) = report.benchmark {
            let _ = self.term.write_line(&benchmark_line("Extracting", elapsed));
        }

        Ok(())
    }
}
