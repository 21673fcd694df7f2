//! Progress display for CLI operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressDrawTarget;
use indicatif::ProgressStyle;
use std::io;
use tarc_core::NoopProgress;
use tarc_core::ProgressCallback;
use tarc_core::TextProgress;

/// Terminal progress bar implementing `ProgressCallback`.
///
/// Draws `label: |████----| 42%` on stdout, or a running item count when
/// the total is unknown. The bar stays on screen after `on_finish` so the
/// final state ends with a newline; a bar that never finished is cleared on
/// drop.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Creates a progress display with nothing drawn yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg}: |{bar:40}| {percent}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█-")
    }

    fn count_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg}: {pos} items")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl ProgressCallback for CliProgress {
    fn on_start(&mut self, label: &str, total: Option<usize>) {
        let bar = match total {
            Some(total) if total > 0 => {
                ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stdout())
                    .with_style(Self::bar_style())
            }
            _ => ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout())
                .with_style(Self::count_style()),
        };
        bar.set_message(label.to_string());
        self.bar = bar;
    }

    fn on_advance(&mut self, count: usize) {
        self.bar.set_position(count as u64);
    }

    fn on_finish(&mut self) {
        self.bar.finish();
    }
}

/// Picks the progress display for this invocation.
///
/// Hidden when `enabled` is false (`--quiet` or `--json`), an indicatif bar
/// on a terminal, plain carriage-return redraws on stdout otherwise.
pub fn create_progress(enabled: bool) -> Box<dyn ProgressCallback> {
    if !enabled {
        Box::new(NoopProgress)
    } else if CliProgress::should_show() {
        Box::new(CliProgress::new())
    } else {
        Box::new(TextProgress::new(io::stdout()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_callback() {
        let mut progress = CliProgress::new();

        progress.on_start("archiving", Some(3));
        progress.on_advance(1);
        progress.on_advance(3);
        assert_eq!(progress.bar.position(), 3);
        assert_eq!(progress.bar.length(), Some(3));

        progress.on_finish();
        assert!(progress.bar.is_finished());
    }

    #[test]
    fn test_unknown_total_counts_items() {
        let mut progress = CliProgress::new();

        progress.on_start("extracting", None);
        progress.on_advance(5);
        assert_eq!(progress.bar.position(), 5);
        assert_eq!(progress.bar.length(), None);
    }

    #[test]
    fn test_drop_without_finish() {
        let mut progress = CliProgress::new();
        progress.on_start("archiving", Some(10));
        progress.on_advance(4);
        drop(progress);
    }
}
