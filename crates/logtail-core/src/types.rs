//! Core domain type definitions

use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use serde::Serialize;

/// Counter for generating unique log entry IDs
static LOG_ENTRY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Sticky classification mode of the tailed stream.
///
/// Once a line is recognized as belonging to one log family, only that
/// family's detectors run for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogType {
    /// Nothing detected yet, both detector families run
    #[default]
    Unset,
    /// Error log style (`*ERROR*` / `*WARN*` markers)
    Error,
    /// Request log style (`[id] -> METHOD` / `[id] <- status`)
    Request,
}

impl LogType {
    /// Whether error/warning detection runs in this mode
    pub fn detects_errors(self) -> bool {
        matches!(self, LogType::Unset | LogType::Error)
    }

    /// Whether request marker detection runs in this mode
    pub fn detects_requests(self) -> bool {
        matches!(self, LogType::Unset | LogType::Request)
    }
}

/// Semantic category of one classified line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Plain,
    ErrorStart,
    ErrorContinuation,
    RequestStart,
    RequestEnd,
}

impl EntryKind {
    /// Part of an error/warning section
    pub fn is_section(self) -> bool {
        matches!(self, EntryKind::ErrorStart | EntryKind::ErrorContinuation)
    }

    /// One half of a request pair
    pub fn is_request(self) -> bool {
        matches!(self, EntryKind::RequestStart | EntryKind::RequestEnd)
    }
}

/// Severity of an error section, fixed when the section opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// Opaque handle of an error section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SectionId(pub u64);

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// How a request anchor participates in its pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorRole {
    /// Rendered on a request start; points at the matching end
    Link,
    /// Rendered on a request end; the place a link jumps to
    Target,
}

/// The `[id]` anchor inside a request line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestAnchor {
    pub role: AnchorRole,
    /// Byte range of `[id]` (brackets included) within the entry text
    pub span: Range<usize>,
}

/// One classified line of the tailed stream
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Unique ID for this entry
    pub id: u64,
    #[serde(skip)]
    pub received_at: DateTime<Local>,
    /// Raw line text, without the line feed
    pub text: String,
    pub kind: EntryKind,
    /// Set on every entry of an error/warning section
    pub severity: Option<Severity>,
    /// Whether the active filter matches this line
    pub matched: bool,
    /// Byte ranges of every filter match, for highlighting
    pub highlights: Vec<Range<usize>>,
    pub section_id: Option<SectionId>,
    pub correlation_id: Option<String>,
    pub anchor: Option<RequestAnchor>,
}

impl LogEntry {
    /// Create a plain, unmatched entry with the current timestamp
    pub fn new(text: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            id: LOG_ENTRY_COUNTER.fetch_add(1, Ordering::Relaxed),
            received_at: Local::now(),
            text: text.into(),
            kind,
            severity: None,
            matched: false,
            highlights: Vec::new(),
            section_id: None,
            correlation_id: None,
            anchor: None,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, EntryKind::Plain)
    }

    /// Entry belongs to an error or warning section
    pub fn is_error_tagged(&self) -> bool {
        self.severity.is_some()
    }

    /// Text before the request anchor, or the whole line
    pub fn prefix(&self) -> &str {
        match &self.anchor {
            Some(anchor) => &self.text[..anchor.span.start],
            None => &self.text,
        }
    }

    /// The `[id]` label of the request anchor
    pub fn anchor_label(&self) -> Option<&str> {
        self.anchor.as_ref().map(|a| &self.text[a.span.clone()])
    }

    /// Text after the request anchor
    pub fn suffix(&self) -> &str {
        match &self.anchor {
            Some(anchor) => &self.text[anchor.span.end..],
            None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_type_detector_families() {
        assert!(LogType::Unset.detects_errors());
        assert!(LogType::Unset.detects_requests());
        assert!(LogType::Error.detects_errors());
        assert!(!LogType::Error.detects_requests());
        assert!(!LogType::Request.detects_errors());
        assert!(LogType::Request.detects_requests());
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let a = LogEntry::plain("a");
        let b = LogEntry::plain("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_anchor_slices() {
        let mut entry = LogEntry::new("GET /x [42] -> GET /x", EntryKind::RequestStart);
        entry.anchor = Some(RequestAnchor {
            role: AnchorRole::Link,
            span: 7..11,
        });
        assert_eq!(entry.prefix(), "GET /x ");
        assert_eq!(entry.anchor_label(), Some("[42]"));
        assert_eq!(entry.suffix(), " -> GET /x");
    }

    #[test]
    fn test_plain_entry_has_no_anchor() {
        let entry = LogEntry::plain("hello");
        assert_eq!(entry.prefix(), "hello");
        assert_eq!(entry.suffix(), "");
        assert!(entry.anchor_label().is_none());
        assert!(!entry.is_error_tagged());
    }

    #[test]
    fn test_entry_kind_families() {
        assert!(EntryKind::ErrorStart.is_section());
        assert!(EntryKind::ErrorContinuation.is_section());
        assert!(!EntryKind::Plain.is_section());
        assert!(EntryKind::RequestEnd.is_request());
    }

    #[test]
    fn test_entry_serializes_kind_snake_case() {
        let mut entry = LogEntry::new("*WARN* low disk", EntryKind::ErrorStart);
        entry.severity = Some(Severity::Warning);
        entry.section_id = Some(SectionId(3));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "error_start");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["section_id"], 3);
    }
}
