//! Progress reporting for archive and extract pipelines.
//!
//! Rendering is split in two:
//!
//! - [`render_line`] is a pure function of `(label, count, total)`.
//! - [`Tracked`] wraps the item sequence and drives a [`ProgressCallback`]
//!   as the caller consumes items.
//!
//! A [`Tracked`] sequence calls [`ProgressCallback::on_finish`] exactly once,
//! when it is exhausted or dropped, including early returns through `?`.

use std::io::Write;

/// Width of the proportional bar in cells.
pub const BAR_WIDTH: usize = 40;

/// Callback trait for progress reporting during archive operations.
///
/// The trait requires `Send` so callbacks can be moved across threads by
/// embedders, even though the pipelines themselves are single-threaded.
///
/// # Examples
///
/// ```
/// use tarc_core::ProgressCallback;
///
/// struct Counter(usize);
///
/// impl ProgressCallback for Counter {
///     fn on_start(&mut self, _label: &str, _total: Option<usize>) {}
///
///     fn on_advance(&mut self, count: usize) {
///         self.0 = count;
///     }
///
///     fn on_finish(&mut self) {}
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called once before the first item, with the total when it is known.
    fn on_start(&mut self, label: &str, total: Option<usize>);

    /// Called after the caller finished processing an item.
    ///
    /// `count` is the number of items processed so far (1-indexed).
    fn on_advance(&mut self, count: usize);

    /// Called exactly once when the sequence ends, normally or not.
    fn on_finish(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_start(&mut self, _label: &str, _total: Option<usize>) {}

    fn on_advance(&mut self, _count: usize) {}

    fn on_finish(&mut self) {}
}

/// Renders one progress line, prefixed with a carriage return.
///
/// With a known positive total the line holds a [`BAR_WIDTH`]-cell bar and a
/// percentage; otherwise it falls back to a running count.
///
/// # Examples
///
/// ```
/// use tarc_core::progress::render_line;
///
/// let line = render_line("archiving", 2, Some(4));
/// assert!(line.starts_with("\rarchiving: |"));
/// assert!(line.ends_with("| 50.0%"));
///
/// assert_eq!(render_line("extracting", 7, None), "\rextracting: 7 items");
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn render_line(label: &str, count: usize, total: Option<usize>) -> String {
    match total {
        Some(total) if total > 0 => {
            let ratio = count as f64 / total as f64;
            let filled = ((BAR_WIDTH as f64 * ratio) as usize).min(BAR_WIDTH);
            format!(
                "\r{label}: |{}{}| {:.1}%",
                "█".repeat(filled),
                "-".repeat(BAR_WIDTH - filled),
                ratio * 100.0
            )
        }
        _ => format!("\r{label}: {count} items"),
    }
}

/// Plain-text progress display redrawing a single line on `out`.
///
/// Used when the output is not an interactive terminal, and in tests.
pub struct TextProgress<W: Write + Send> {
    out: W,
    label: String,
    total: Option<usize>,
}

impl<W: Write + Send> TextProgress<W> {
    /// Creates a text progress display writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            label: String::new(),
            total: None,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ProgressCallback for TextProgress<W> {
    fn on_start(&mut self, label: &str, total: Option<usize>) {
        self.label = label.to_string();
        self.total = total;
    }

    fn on_advance(&mut self, count: usize) {
        let line = render_line(&self.label, count, self.total);
        let _ = self.out.write_all(line.as_bytes());
        let _ = self.out.flush();
    }

    fn on_finish(&mut self) {
        let _ = self.out.write_all(b"\n");
        let _ = self.out.flush();
    }
}

/// Iterator adapter that reports progress as items are consumed.
///
/// The item yielded by one `next()` call counts as processed when the caller
/// asks for the following item, or when the sequence is exhausted. Items are
/// passed through unchanged.
pub struct Tracked<'a, I> {
    inner: I,
    progress: &'a mut dyn ProgressCallback,
    count: usize,
    pending: bool,
    finished: bool,
}

/// Wraps `items` so that consuming them drives `progress`.
///
/// The total is taken from an exact `size_hint`; otherwise it is unknown and
/// the display falls back to a running count.
///
/// # Examples
///
/// ```
/// use tarc_core::progress::TextProgress;
/// use tarc_core::progress::track;
///
/// let mut out = Vec::new();
/// let mut progress = TextProgress::new(&mut out);
/// let doubled: Vec<i32> = track([1, 2, 3], "working", &mut progress)
///     .map(|n| n * 2)
///     .collect();
/// drop(progress);
///
/// assert_eq!(doubled, [2, 4, 6]);
/// assert!(String::from_utf8(out).unwrap().ends_with("100.0%\n"));
/// ```
pub fn track<'a, I: IntoIterator>(
    items: I,
    label: &str,
    progress: &'a mut dyn ProgressCallback,
) -> Tracked<'a, I::IntoIter> {
    let inner = items.into_iter();
    let total = match inner.size_hint() {
        (lower, Some(upper)) if lower == upper => Some(lower),
        _ => None,
    };
    progress.on_start(label, total);
    Tracked {
        inner,
        progress,
        count: 0,
        pending: false,
        finished: false,
    }
}

impl<I> Tracked<'_, I> {
    /// Number of items processed so far.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            self.progress.on_finish();
        }
    }
}

impl<I: Iterator> Iterator for Tracked<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending {
            self.pending = false;
            self.count += 1;
            self.progress.on_advance(self.count);
        }
        if self.finished {
            return None;
        }
        if let Some(item) = self.inner.next() {
            self.pending = true;
            Some(item)
        } else {
            self.finish();
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I> Drop for Tracked<'_, I> {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ProgressCallback for Recorder {
        fn on_start(&mut self, label: &str, total: Option<usize>) {
            self.events.push(format!("start {label} {total:?}"));
        }

        fn on_advance(&mut self, count: usize) {
            self.events.push(format!("advance {count}"));
        }

        fn on_finish(&mut self) {
            self.events.push("finish".to_string());
        }
    }

    #[test]
    fn test_render_line_full_bar() {
        let line = render_line("archiving", 4, Some(4));
        assert_eq!(line, format!("\rarchiving: |{}| 100.0%", "█".repeat(40)));
    }

    #[test]
    fn test_render_line_partial_bar() {
        let line = render_line("archiving", 1, Some(4));
        let expected = format!("\rarchiving: |{}{}| 25.0%", "█".repeat(10), "-".repeat(30));
        assert_eq!(line, expected);
    }

    #[test]
    fn test_render_line_unknown_total() {
        assert_eq!(render_line("extracting", 3, None), "\rextracting: 3 items");
        assert_eq!(render_line("extracting", 3, Some(0)), "\rextracting: 3 items");
    }

    #[test]
    fn test_tracked_reports_each_item() {
        let mut recorder = Recorder::default();
        let items: Vec<_> = track(vec!['a', 'b'], "label", &mut recorder).collect();
        assert_eq!(items, ['a', 'b']);
        assert_eq!(
            recorder.events,
            ["start label Some(2)", "advance 1", "advance 2", "finish"]
        );
    }

    #[test]
    fn test_tracked_unknown_total() {
        let mut recorder = Recorder::default();
        let mut n = 0;
        let source = std::iter::from_fn(|| {
            n += 1;
            (n <= 2).then_some(n)
        });
        let count = track(source, "count", &mut recorder).count();
        assert_eq!(count, 2);
        assert_eq!(recorder.events[0], "start count None");
        assert_eq!(recorder.events.last().unwrap(), "finish");
    }

    #[test]
    fn test_tracked_finishes_once_on_early_exit() {
        fn consume(progress: &mut dyn ProgressCallback) -> Result<(), String> {
            for item in track([1, 2, 3], "fail", progress) {
                if item == 2 {
                    return Err("boom".to_string());
                }
            }
            Ok(())
        }

        let mut recorder = Recorder::default();
        assert!(consume(&mut recorder).is_err());
        assert_eq!(
            recorder.events,
            ["start fail Some(3)", "advance 1", "finish"]
        );
    }

    #[test]
    fn test_tracked_empty_sequence() {
        let mut recorder = Recorder::default();
        assert_eq!(track(Vec::<u8>::new(), "none", &mut recorder).count(), 0);
        assert_eq!(recorder.events, ["start none Some(0)", "finish"]);
    }

    #[test]
    fn test_tracked_next_after_exhaustion() {
        let mut recorder = Recorder::default();
        let mut tracked = track([1], "once", &mut recorder);
        assert_eq!(tracked.next(), Some(1));
        assert_eq!(tracked.next(), None);
        assert_eq!(tracked.next(), None);
        assert_eq!(Tracked::count(&tracked), 1);
        drop(tracked);
        assert_eq!(recorder.events.iter().filter(|e| *e == "finish").count(), 1);
    }

    #[test]
    fn test_text_progress_single_trailing_newline() {
        let mut out = Vec::new();
        let mut progress = TextProgress::new(&mut out);
        for _ in track(0..5, "archiving", &mut progress) {}
        drop(progress);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('\n').count(), 1);
        assert!(text.ends_with(&format!("|{}| 100.0%\n", "█".repeat(40))));
        assert_eq!(text.matches('\r').count(), 5);
    }
}
