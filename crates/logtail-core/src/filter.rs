//! Live find filter and view visibility rules

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};
use crate::types::LogEntry;

/// A compiled, case-insensitive find expression
#[derive(Debug, Clone)]
pub struct FindFilter {
    pattern: String,
    regex: Regex,
}

impl FindFilter {
    /// Compile a user-supplied expression
    pub fn compile(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::invalid_pattern(pattern, e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Byte ranges of all non-overlapping, non-empty matches
    pub fn match_ranges(&self, line: &str) -> Vec<Range<usize>> {
        self.regex
            .find_iter(line)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
            .collect()
    }

    /// Refresh `matched` and `highlights` of an entry
    pub fn apply(&self, entry: &mut LogEntry) {
        entry.matched = self.is_match(&entry.text);
        entry.highlights = self.match_ranges(&entry.text);
    }
}

/// Apply an optional filter; no filter clears match state
pub fn apply_filter(filter: Option<&FindFilter>, entry: &mut LogEntry) {
    match filter {
        Some(filter) => filter.apply(entry),
        None => {
            entry.matched = false;
            entry.highlights.clear();
        }
    }
}

/// Presentation-level visibility toggles.
///
/// Visibility is always derived from an entry's stored flags, so toggling a
/// mode never re-classifies anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Show error and warning sections only
    pub error_focused: bool,
    /// Hide entries that are neither matched nor error/warning tagged
    pub show_matched_only: bool,
}

impl ViewFilter {
    pub fn is_visible(&self, entry: &LogEntry) -> bool {
        if entry.is_error_tagged() {
            return true;
        }
        if self.error_focused {
            return false;
        }
        !self.show_matched_only || entry.matched
    }

    /// Nothing is hidden
    pub fn is_passthrough(&self) -> bool {
        !self.error_focused && !self.show_matched_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryKind, Severity};

    fn tagged(text: &str, severity: Severity) -> LogEntry {
        let mut entry = LogEntry::new(text, EntryKind::ErrorStart);
        entry.severity = Some(severity);
        entry
    }

    #[test]
    fn test_compile_is_case_insensitive() {
        let filter = FindFilter::compile("timeout").unwrap();
        assert!(filter.is_match("Read TIMEOUT after 30s"));
        assert_eq!(filter.pattern(), "timeout");
    }

    #[test]
    fn test_compile_rejects_invalid_expression() {
        let err = FindFilter::compile("[unclosed").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "[unclosed"));
    }

    #[test]
    fn test_match_ranges_cover_every_hit() {
        let filter = FindFilter::compile("ab").unwrap();
        assert_eq!(filter.match_ranges("ab xAB ab"), vec![0..2, 4..6, 7..9]);
    }

    #[test]
    fn test_empty_matches_are_skipped() {
        let filter = FindFilter::compile("x*").unwrap();
        assert_eq!(filter.match_ranges("axxb"), vec![1..3]);
    }

    #[test]
    fn test_apply_and_clear() {
        let filter = FindFilter::compile("disk").unwrap();
        let mut entry = LogEntry::plain("low disk space");
        filter.apply(&mut entry);
        assert!(entry.matched);
        assert_eq!(entry.highlights, vec![4..8]);

        apply_filter(None, &mut entry);
        assert!(!entry.matched);
        assert!(entry.highlights.is_empty());
    }

    #[test]
    fn test_visibility_rules() {
        let plain = LogEntry::plain("plain");
        let mut matched = LogEntry::plain("matched");
        matched.matched = true;
        let error = tagged("*ERROR* x", Severity::Error);
        let warning = tagged("*WARN* y", Severity::Warning);

        let all = ViewFilter::default();
        assert!(all.is_passthrough());
        for entry in [&plain, &matched, &error, &warning] {
            assert!(all.is_visible(entry));
        }

        let focus = ViewFilter {
            error_focused: true,
            show_matched_only: false,
        };
        assert!(!focus.is_visible(&plain));
        assert!(!focus.is_visible(&matched));
        assert!(focus.is_visible(&error));
        assert!(focus.is_visible(&warning));

        let matched_only = ViewFilter {
            error_focused: false,
            show_matched_only: true,
        };
        assert!(!matched_only.is_visible(&plain));
        assert!(matched_only.is_visible(&matched));
        assert!(matched_only.is_visible(&error));

        let both = ViewFilter {
            error_focused: true,
            show_matched_only: true,
        };
        assert!(!both.is_visible(&matched));
        assert!(both.is_visible(&warning));
    }
}
