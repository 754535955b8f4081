//! Streaming log processor.
//!
//! [`LogStreamState`] is the single mutable context of one view session. It
//! reassembles lines from raw chunks, classifies each complete line with a
//! sticky state machine, aggregates error sections, links request markers and
//! applies the live find filter. Rendering is left to whoever consumes the
//! produced [`LogEntry`] values.

use crate::error::Result;
use crate::error_section::{ErrorAggregator, OpenSection, SectionStep};
use crate::filter::{apply_filter, FindFilter, ViewFilter};
use crate::request_link::{detect_request_marker, RequestMarker};
use crate::stream_buffer::StreamBuffer;
use crate::types::{EntryKind, LogEntry, LogType, RequestAnchor, SectionId, Severity};

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Tagged result of classifying one complete line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Joined the open error section
    Continuation(OpenSection),
    /// Opened a new error section
    SectionStart(OpenSection),
    /// Request start or end marker
    Request(RequestMarker),
    Plain,
}

impl LineClass {
    pub fn kind(&self) -> EntryKind {
        match self {
            LineClass::Continuation(_) => EntryKind::ErrorContinuation,
            LineClass::SectionStart(_) => EntryKind::ErrorStart,
            LineClass::Request(marker) if marker.is_start() => EntryKind::RequestStart,
            LineClass::Request(_) => EntryKind::RequestEnd,
            LineClass::Plain => EntryKind::Plain,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Processor
// ─────────────────────────────────────────────────────────────────────────────

/// Processing context of one view session
#[derive(Debug)]
pub struct LogStreamState {
    buffer: StreamBuffer,
    log_type: LogType,
    errors: ErrorAggregator,
    filter: Option<FindFilter>,
    view: ViewFilter,
    follow: bool,
}

impl LogStreamState {
    pub fn new() -> Self {
        Self {
            buffer: StreamBuffer::new(),
            log_type: LogType::Unset,
            errors: ErrorAggregator::new(),
            filter: None,
            view: ViewFilter::default(),
            follow: true,
        }
    }

    /// Feed a raw chunk and get the entries for every line it completes
    pub fn ingest(&mut self, chunk: &str) -> Vec<LogEntry> {
        self.buffer
            .ingest(chunk)
            .into_iter()
            .map(|line| self.process_line(line))
            .collect()
    }

    /// Classify, build and highlight the entry for one complete line
    pub fn process_line(&mut self, line: String) -> LogEntry {
        let class = self.classify_line(&line);
        let mut entry = LogEntry::new(line, class.kind());

        match class {
            LineClass::Continuation(section) | LineClass::SectionStart(section) => {
                entry.section_id = Some(section.id);
                entry.severity = Some(section.severity);
            }
            LineClass::Request(marker) => {
                entry.anchor = Some(RequestAnchor {
                    role: marker.role,
                    span: marker.anchor,
                });
                entry.correlation_id = Some(marker.id);
            }
            LineClass::Plain => {}
        }

        apply_filter(self.filter.as_ref(), &mut entry);
        entry
    }

    /// Run the sticky state machine for one complete line
    pub fn classify_line(&mut self, line: &str) -> LineClass {
        if self.log_type.detects_errors() {
            match self.errors.offer(line) {
                SectionStep::Continued(section) => return LineClass::Continuation(section),
                SectionStep::Closed(_) | SectionStep::Idle => {}
            }

            if let Some(section) = self.errors.open(line) {
                self.log_type = LogType::Error;
                return LineClass::SectionStart(section);
            }
        }

        if self.log_type.detects_requests() {
            if let Some(marker) = detect_request_marker(line) {
                self.log_type = LogType::Request;
                return LineClass::Request(marker);
            }
        }

        LineClass::Plain
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filter
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the find filter.
    ///
    /// An empty expression clears the filter. An invalid expression is
    /// rejected and the previous filter stays active.
    pub fn set_find_pattern(&mut self, pattern: &str) -> Result<()> {
        if pattern.is_empty() {
            self.filter = None;
            return Ok(());
        }
        self.filter = Some(FindFilter::compile(pattern)?);
        Ok(())
    }

    pub fn find_filter(&self) -> Option<&FindFilter> {
        self.filter.as_ref()
    }

    pub fn find_pattern(&self) -> Option<&str> {
        self.filter.as_ref().map(FindFilter::pattern)
    }

    /// Re-evaluate match state of an already emitted entry
    pub fn rehighlight(&self, entry: &mut LogEntry) {
        apply_filter(self.filter.as_ref(), entry);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // View toggles
    // ─────────────────────────────────────────────────────────────────────────

    pub fn view_filter(&self) -> ViewFilter {
        self.view
    }

    pub fn is_visible(&self, entry: &LogEntry) -> bool {
        self.view.is_visible(entry)
    }

    pub fn toggle_error_focus(&mut self) -> bool {
        self.view.error_focused = !self.view.error_focused;
        self.view.error_focused
    }

    pub fn toggle_matched_only(&mut self) -> bool {
        self.view.show_matched_only = !self.view.show_matched_only;
        self.view.show_matched_only
    }

    pub fn follow(&self) -> bool {
        self.follow
    }

    pub fn set_follow(&mut self, follow: bool) {
        self.follow = follow;
    }

    pub fn toggle_follow(&mut self) -> bool {
        self.follow = !self.follow;
        self.follow
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Session reset, on reconnect or file switch.
    ///
    /// Drops the pending fragment, the sticky mode, the open section and error
    /// focus. The find filter, match-only and follow are user choices and
    /// survive.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.log_type = LogType::Unset;
        self.errors.reset();
        self.view.error_focused = false;
    }

    pub fn log_type(&self) -> LogType {
        self.log_type
    }

    pub fn open_section(&self) -> Option<(SectionId, Severity)> {
        self.errors.open_section().map(|s| (s.id, s.severity))
    }

    /// Unterminated trailing fragment
    pub fn pending(&self) -> &str {
        self.buffer.pending()
    }
}

impl Default for LogStreamState {
    fn default() -> Self {
        Self::new()
    }
}
