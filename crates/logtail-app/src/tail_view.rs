//! Tail view store - the bounded list of rendered lines.
//!
//! Owns the [`LogStreamState`] of the session and everything it has emitted,
//! interleaved with informational lines, plus the cached list of lines that
//! are currently visible. Every line gets a monotonically increasing sequence
//! number, so positions stay stable while old lines are evicted from the
//! front.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use logtail_core::prelude::*;
use logtail_core::{EntryKind, LogEntry, LogStreamState, LogType, SectionId, Severity, ViewFilter};

/// Default number of lines kept before eviction
pub const DEFAULT_MAX_LINES: usize = 10_000;

// ─────────────────────────────────────────────────────────────────────────────
// Lines
// ─────────────────────────────────────────────────────────────────────────────

/// Informational message inserted between log lines
#[derive(Debug, Clone, PartialEq)]
pub struct InfoLine {
    pub text: String,
    pub received_at: DateTime<Local>,
}

impl InfoLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            received_at: Local::now(),
        }
    }
}

/// One line of the view
#[derive(Debug, Clone)]
pub enum ViewLine {
    Entry(LogEntry),
    Info(InfoLine),
}

impl ViewLine {
    pub fn as_entry(&self) -> Option<&LogEntry> {
        match self {
            ViewLine::Entry(entry) => Some(entry),
            ViewLine::Info(_) => None,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ViewLine::Entry(entry) => &entry.text,
            ViewLine::Info(info) => &info.text,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.as_entry().is_some_and(|e| e.matched)
    }

    fn is_kind(&self, kind: EntryKind) -> bool {
        self.as_entry().is_some_and(|e| e.kind == kind)
    }
}

/// Error and warning sections currently held by the view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionCounts {
    pub errors: usize,
    pub warnings: usize,
}

impl SectionCounts {
    fn adjust(&mut self, entry: &LogEntry, added: bool) {
        if entry.kind != EntryKind::ErrorStart {
            return;
        }
        let slot = match entry.severity {
            Some(Severity::Error) => &mut self.errors,
            Some(Severity::Warning) => &mut self.warnings,
            None => return,
        };
        if added {
            *slot += 1;
        } else {
            *slot = slot.saturating_sub(1);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TailView
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct TailView {
    stream: LogStreamState,
    lines: VecDeque<ViewLine>,
    /// Sequence number of `lines[0]`
    base_seq: u64,
    /// Sequence numbers of visible lines, ascending
    visible: VecDeque<u64>,
    max_lines: usize,
    counts: SectionCounts,
    /// Bumped on every session reset
    generation: u64,
    /// Visible lines evicted since the last [`TailView::take_evicted_visible`]
    evicted_visible: usize,
}

impl Default for TailView {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl TailView {
    pub fn new(max_lines: usize) -> Self {
        Self {
            stream: LogStreamState::new(),
            lines: VecDeque::new(),
            base_seq: 0,
            visible: VecDeque::new(),
            max_lines: max_lines.max(1),
            counts: SectionCounts::default(),
            generation: 0,
            evicted_visible: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ingest
    // ─────────────────────────────────────────────────────────────────────────

    /// Feed a raw chunk from the transport; returns the number of new entries
    pub fn ingest(&mut self, chunk: &str) -> usize {
        let entries = self.stream.ingest(chunk);
        let count = entries.len();
        for entry in entries {
            self.push_line(ViewLine::Entry(entry));
        }
        count
    }

    /// Append an informational line
    pub fn push_info(&mut self, text: impl Into<String>) {
        self.push_line(ViewLine::Info(InfoLine::new(text)));
    }

    fn push_line(&mut self, line: ViewLine) {
        if let ViewLine::Entry(entry) = &line {
            self.counts.adjust(entry, true);
        }
        if self.is_line_visible(&line) {
            self.visible.push_back(self.end_seq());
        }
        self.lines.push_back(line);

        while self.lines.len() > self.max_lines {
            self.evict_front();
        }
    }

    fn evict_front(&mut self) {
        let Some(line) = self.lines.pop_front() else {
            return;
        };
        if self.visible.front() == Some(&self.base_seq) {
            self.visible.pop_front();
            self.evicted_visible += 1;
        }
        if let ViewLine::Entry(entry) = &line {
            self.counts.adjust(entry, false);
        }
        self.base_seq += 1;
    }

    /// Visible lines evicted since the last call, for scroll compensation
    pub fn take_evicted_visible(&mut self) -> usize {
        std::mem::take(&mut self.evicted_visible)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Visibility
    // ─────────────────────────────────────────────────────────────────────────

    fn is_line_visible(&self, line: &ViewLine) -> bool {
        match line {
            ViewLine::Entry(entry) => self.stream.is_visible(entry),
            ViewLine::Info(_) => true,
        }
    }

    fn rederive_visibility(&mut self) {
        let visible = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.is_line_visible(line))
            .map(|(i, _)| self.base_seq + i as u64)
            .collect();
        self.visible = visible;
    }

    pub fn toggle_error_focus(&mut self) -> bool {
        let on = self.stream.toggle_error_focus();
        self.rederive_visibility();
        on
    }

    pub fn toggle_matched_only(&mut self) -> bool {
        let on = self.stream.toggle_matched_only();
        self.rederive_visibility();
        on
    }

    pub fn view_filter(&self) -> ViewFilter {
        self.stream.view_filter()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Find filter
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the find filter and re-highlight every held entry.
    ///
    /// On an invalid expression nothing changes and the error is returned.
    pub fn set_filter(&mut self, pattern: &str) -> Result<()> {
        self.stream.set_find_pattern(pattern)?;

        let stream = &self.stream;
        for line in self.lines.iter_mut() {
            if let ViewLine::Entry(entry) = line {
                stream.rehighlight(entry);
            }
        }
        self.rederive_visibility();
        Ok(())
    }

    pub fn filter_pattern(&self) -> Option<&str> {
        self.stream.find_pattern()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Follow
    // ─────────────────────────────────────────────────────────────────────────

    pub fn follow(&self) -> bool {
        self.stream.follow()
    }

    pub fn set_follow(&mut self, follow: bool) {
        self.stream.set_follow(follow);
    }

    pub fn toggle_follow(&mut self) -> bool {
        self.stream.toggle_follow()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a new session: empty view, fresh stream state.
    ///
    /// The find filter, match-only and follow carry over.
    pub fn reset(&mut self) {
        self.stream.reset();
        self.base_seq += self.lines.len() as u64;
        self.lines.clear();
        self.visible.clear();
        self.counts = SectionCounts::default();
        self.evicted_visible = 0;
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn log_type(&self) -> LogType {
        self.stream.log_type()
    }

    pub fn open_section(&self) -> Option<(SectionId, Severity)> {
        self.stream.open_section()
    }

    pub fn counts(&self) -> SectionCounts {
        self.counts
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Access
    // ─────────────────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sequence number the next line will get
    pub fn end_seq(&self) -> u64 {
        self.base_seq + self.lines.len() as u64
    }

    /// Held lines with a sequence number of at least `seq`
    pub fn lines_since(&self, seq: u64) -> impl Iterator<Item = &ViewLine> {
        let skip = seq.saturating_sub(self.base_seq) as usize;
        self.lines.iter().skip(skip)
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn visible_line(&self, index: usize) -> Option<&ViewLine> {
        let seq = *self.visible.get(index)?;
        self.lines.get((seq - self.base_seq) as usize)
    }

    /// Visible lines in `start..end`
    pub fn visible_slice(&self, start: usize, end: usize) -> impl Iterator<Item = &ViewLine> {
        self.visible
            .range(start.min(self.visible.len())..end.min(self.visible.len()))
            .filter_map(|seq| self.lines.get((seq - self.base_seq) as usize))
    }

    pub fn seq_of_visible(&self, index: usize) -> Option<u64> {
        self.visible.get(index).copied()
    }

    /// Visible index of `seq`, or of the first visible line after it
    pub fn visible_index_at_or_after(&self, seq: u64) -> usize {
        self.visible.partition_point(|&s| s < seq)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// First matched visible line after `index`
    pub fn next_match(&self, index: usize) -> Option<usize> {
        (index.saturating_add(1)..self.visible_len())
            .find(|&i| self.visible_line(i).is_some_and(ViewLine::is_matched))
    }

    /// Last matched visible line before `index`
    pub fn prev_match(&self, index: usize) -> Option<usize> {
        (0..index.min(self.visible_len()))
            .rev()
            .find(|&i| self.visible_line(i).is_some_and(ViewLine::is_matched))
    }

    /// First visible request start in `start..end`
    pub fn find_request_start(&self, start: usize, end: usize) -> Option<usize> {
        (start..end.min(self.visible_len()))
            .find(|&i| self.visible_line(i).is_some_and(|l| l.is_kind(EntryKind::RequestStart)))
    }

    /// Visible request end paired with the request start at `index`
    pub fn find_request_end(&self, index: usize) -> Option<usize> {
        let start = self.visible_line(index)?.as_entry()?;
        if start.kind != EntryKind::RequestStart {
            return None;
        }
        let id = start.correlation_id.as_deref()?;

        (index + 1..self.visible_len()).find(|&i| {
            self.visible_line(i)
                .and_then(ViewLine::as_entry)
                .is_some_and(|e| e.kind == EntryKind::RequestEnd && e.correlation_id.as_deref() == Some(id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERROR_LOG: &str = "\
01.01.2024 10:00:00 *INFO* [main] started
01.01.2024 10:00:01 *ERROR* [main] boom
\tat a.B.c(B.java:1)
01.01.2024 10:00:02 *WARN* [main] careful
01.01.2024 10:00:03 *INFO* [main] done
";

    const REQUEST_LOG: &str = "\
01/Jan/2024:10:00:00 +0000 [42] -> GET /content/page.html HTTP/1.1
01/Jan/2024:10:00:00 +0000 [43] -> POST /bin/submit HTTP/1.1
01/Jan/2024:10:00:01 +0000 [43] <- 500 text/html 12ms
01/Jan/2024:10:00:01 +0000 [42] <- 200 text/html 30ms
";

    fn texts(view: &TailView) -> Vec<String> {
        view.visible_slice(0, view.visible_len())
            .map(|l| l.text().to_string())
            .collect()
    }

    #[test]
    fn test_ingest_appends_visible_lines() {
        let mut view = TailView::default();
        assert_eq!(view.ingest(ERROR_LOG), 5);
        assert_eq!(view.len(), 5);
        assert_eq!(view.visible_len(), 5);
        assert_eq!(
            view.counts(),
            SectionCounts {
                errors: 1,
                warnings: 1
            }
        );
    }

    #[test]
    fn test_partial_line_waits_for_line_feed() {
        let mut view = TailView::default();
        assert_eq!(view.ingest("half a li"), 0);
        assert!(view.is_empty());
        assert_eq!(view.ingest("ne\n"), 1);
        assert_eq!(view.visible_line(0).unwrap().text(), "half a line");
    }

    #[test]
    fn test_error_focus_keeps_sections_and_info() {
        let mut view = TailView::default();
        view.ingest(ERROR_LOG);
        view.push_info("Connection to server lost. Trying to reconnect ...");

        assert!(view.toggle_error_focus());
        assert_eq!(
            texts(&view),
            vec![
                "01.01.2024 10:00:01 *ERROR* [main] boom",
                "\tat a.B.c(B.java:1)",
                "01.01.2024 10:00:02 *WARN* [main] careful",
                "Connection to server lost. Trying to reconnect ...",
            ]
        );

        assert!(!view.toggle_error_focus());
        assert_eq!(view.visible_len(), 6);
    }

    #[test]
    fn test_filter_rehighlights_existing_entries() {
        let mut view = TailView::default();
        view.ingest(ERROR_LOG);

        view.set_filter("careful|done").unwrap();
        let matched: Vec<bool> = view
            .visible_slice(0, 5)
            .map(ViewLine::is_matched)
            .collect();
        assert_eq!(matched, vec![false, false, false, true, true]);

        let warn = view.visible_line(3).unwrap().as_entry().unwrap();
        assert_eq!(warn.kind, EntryKind::ErrorStart);
        assert_eq!(warn.highlights.len(), 1);

        view.set_filter("").unwrap();
        assert!(view.visible_slice(0, 5).all(|l| !l.is_matched()));
        assert!(view.filter_pattern().is_none());
    }

    #[test]
    fn test_invalid_filter_keeps_previous() {
        let mut view = TailView::default();
        view.ingest(ERROR_LOG);
        view.set_filter("done").unwrap();

        assert!(view.set_filter("(").is_err());
        assert_eq!(view.filter_pattern(), Some("done"));
        assert!(view.visible_line(4).unwrap().is_matched());
    }

    #[test]
    fn test_matched_only_hides_unmatched_but_not_errors() {
        let mut view = TailView::default();
        view.ingest(ERROR_LOG);
        view.set_filter("started").unwrap();
        view.toggle_matched_only();

        assert_eq!(
            texts(&view),
            vec![
                "01.01.2024 10:00:00 *INFO* [main] started",
                "01.01.2024 10:00:01 *ERROR* [main] boom",
                "\tat a.B.c(B.java:1)",
                "01.01.2024 10:00:02 *WARN* [main] careful",
            ]
        );
    }

    #[test]
    fn test_new_lines_respect_active_toggles() {
        let mut view = TailView::default();
        view.toggle_error_focus();
        view.ingest(ERROR_LOG);
        assert_eq!(view.len(), 5);
        assert_eq!(view.visible_len(), 3);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut view = TailView::new(3);
        view.ingest(ERROR_LOG);

        assert_eq!(view.len(), 3);
        assert_eq!(view.end_seq(), 5);
        assert_eq!(view.visible_line(0).unwrap().text(), "\tat a.B.c(B.java:1)");
        assert_eq!(view.take_evicted_visible(), 2);
        assert_eq!(view.take_evicted_visible(), 0);
        // the error section start went with the evicted lines
        assert_eq!(
            view.counts(),
            SectionCounts {
                errors: 0,
                warnings: 1
            }
        );
    }

    #[test]
    fn test_eviction_of_hidden_line_does_not_shift() {
        let mut view = TailView::new(2);
        view.toggle_error_focus();
        view.ingest("plain one\nplain two\nplain three\n");
        assert_eq!(view.visible_len(), 0);
        assert_eq!(view.take_evicted_visible(), 0);
    }

    #[test]
    fn test_reset_clears_lines_and_keeps_filter() {
        let mut view = TailView::default();
        view.ingest(ERROR_LOG);
        view.set_filter("boom").unwrap();
        view.toggle_error_focus();
        view.ingest("dangling");

        let generation = view.generation();
        view.reset();

        assert!(view.is_empty());
        assert_eq!(view.visible_len(), 0);
        assert_eq!(view.generation(), generation + 1);
        assert_eq!(view.counts(), SectionCounts::default());
        assert_eq!(view.filter_pattern(), Some("boom"));
        assert!(!view.view_filter().error_focused);
        assert_eq!(view.log_type(), LogType::Unset);

        // the dangling fragment is gone
        view.ingest("fresh\n");
        assert_eq!(view.visible_line(0).unwrap().text(), "fresh");
    }

    #[test]
    fn test_sequence_numbers_survive_reset() {
        let mut view = TailView::default();
        view.ingest("a\nb\n");
        view.reset();
        assert_eq!(view.end_seq(), 2);
        view.ingest("c\n");
        assert_eq!(view.seq_of_visible(0), Some(2));
        assert_eq!(view.lines_since(0).count(), 1);
    }

    #[test]
    fn test_lines_since() {
        let mut view = TailView::default();
        view.ingest("a\nb\n");
        let mark = view.end_seq();
        view.push_info("note");
        view.ingest("c\n");

        let new: Vec<&str> = view.lines_since(mark).map(ViewLine::text).collect();
        assert_eq!(new, vec!["note", "c"]);
    }

    #[test]
    fn test_match_navigation() {
        let mut view = TailView::default();
        view.ingest("x one\ny\nx two\nz\nx three\n");
        view.set_filter("^x").unwrap();

        assert_eq!(view.next_match(0), Some(2));
        assert_eq!(view.next_match(2), Some(4));
        assert_eq!(view.next_match(4), None);
        assert_eq!(view.prev_match(4), Some(2));
        assert_eq!(view.prev_match(0), None);
    }

    #[test]
    fn test_request_link_finds_paired_end() {
        let mut view = TailView::default();
        view.ingest(REQUEST_LOG);

        assert_eq!(view.find_request_start(0, 4), Some(0));
        assert_eq!(view.find_request_end(0), Some(3));
        assert_eq!(view.find_request_end(1), Some(2));
        // ends have no link
        assert_eq!(view.find_request_end(2), None);
    }

    #[test]
    fn test_request_link_without_visible_end() {
        let mut view = TailView::default();
        view.ingest(&REQUEST_LOG[..REQUEST_LOG.find("[43] <-").unwrap()]);
        assert_eq!(view.find_request_end(0), None);
    }

    #[test]
    fn test_visible_index_at_or_after() {
        let mut view = TailView::default();
        view.ingest(ERROR_LOG);
        view.toggle_error_focus();
        // line 0 is hidden, the first visible line is the error start
        assert_eq!(view.visible_index_at_or_after(0), 0);
        assert_eq!(view.visible_index_at_or_after(3), 2);
        assert_eq!(view.visible_index_at_or_after(4), 3);
    }
}
