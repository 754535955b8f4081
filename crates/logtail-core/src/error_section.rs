//! Aggregation of multi-line error and warning sections.
//!
//! A section opens on a line carrying `*ERROR*` or `*WARN*` and swallows the
//! following lines for as long as they look like a continuation (stack frames,
//! `Caused by:` chains, wrapped messages). The first line that does not look
//! like one closes it.

use crate::types::{SectionId, Severity};

/// Marker substring that opens an error section
pub const ERROR_MARKER: &str = "*ERROR*";

/// Marker substring that opens a warning section
pub const WARN_MARKER: &str = "*WARN*";

/// Severity a line would open a section with, if it carries a marker.
///
/// The warning marker wins when both are present.
pub fn marker_severity(line: &str) -> Option<Severity> {
    if line.contains(WARN_MARKER) {
        Some(Severity::Warning)
    } else if line.contains(ERROR_MARKER) {
        Some(Severity::Error)
    } else {
        None
    }
}

/// Whether `line` continues the currently open section.
///
/// A leading tab always continues. Otherwise a line continues unless its first
/// character reads as numeric: a digit (usually the timestamp of the next log
/// record), whitespace, or no character at all. This is a heuristic; a stack
/// line that happens to start with a digit still ends the section.
pub fn is_continuation_line(line: &str) -> bool {
    match line.chars().next() {
        Some('\t') => true,
        Some(c) => !reads_as_numeric(c),
        None => false,
    }
}

/// Characters that convert to a number on their own: ASCII digits, and the
/// whitespace a numeric conversion trims to an empty string (zero). That is
/// Unicode `White_Space` without NEL (U+0085), plus the byte order mark.
fn reads_as_numeric(c: char) -> bool {
    match c {
        '\u{0085}' => false,
        '\u{FEFF}' => true,
        c => c.is_ascii_digit() || c.is_whitespace(),
    }
}

/// The section currently accumulating lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSection {
    pub id: SectionId,
    pub severity: Severity,
    /// Lines in the section so far, the start line included
    pub lines: usize,
}

/// Outcome of offering a line to the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStep {
    /// No section is open; the line was not looked at
    Idle,
    /// The line joined the open section
    Continued(OpenSection),
    /// The open section was closed by this line, which is not part of it
    Closed(OpenSection),
}

/// Owns the at-most-one open error section
#[derive(Debug, Default)]
pub struct ErrorAggregator {
    open: Option<OpenSection>,
    next_id: u64,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a line to the open section, if any
    pub fn offer(&mut self, line: &str) -> SectionStep {
        let Some(section) = self.open.as_mut() else {
            return SectionStep::Idle;
        };

        if is_continuation_line(line) {
            section.lines += 1;
            return SectionStep::Continued(*section);
        }

        let closed = *section;
        self.open = None;
        SectionStep::Closed(closed)
    }

    /// Open a new section for a marker line.
    ///
    /// Returns `None` when the line carries no marker. Any section still open
    /// is replaced.
    pub fn open(&mut self, line: &str) -> Option<OpenSection> {
        let severity = marker_severity(line)?;
        let section = OpenSection {
            id: SectionId(self.next_id),
            severity,
            lines: 1,
        };
        self.next_id += 1;
        self.open = Some(section);
        Some(section)
    }

    pub fn open_section(&self) -> Option<&OpenSection> {
        self.open.as_ref()
    }

    /// Drop the open section. Section ids keep increasing across resets.
    pub fn reset(&mut self) {
        self.open = None;
    }
}
