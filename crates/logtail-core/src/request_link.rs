//! Request start/end marker detection.
//!
//! Request logs print one line when a request starts and another when it
//! completes, both tagged with the same bracketed numeric id:
//!
//! ```text
//! 01/Jan/2024:12:00:00 +0000 [42] -> GET /content/page.html HTTP/1.1
//! 01/Jan/2024:12:00:00 +0000 [42] <- 200 text/html 12ms
//! ```

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::types::AnchorRole;

static REQUEST_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.* )\[([0-9]+)\]( -> (GET|POST|PUT|HEAD|DELETE) .*)")
        .expect("request start pattern is valid")
});

static REQUEST_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.* )\[([0-9]+)\]( <- [0-9]+ .*)").expect("request end pattern is valid")
});

/// A request marker found in a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMarker {
    pub role: AnchorRole,
    /// The bracketed digits, without brackets
    pub id: String,
    /// Byte range of `[id]` within the line
    pub anchor: Range<usize>,
}

impl RequestMarker {
    fn from_captures(role: AnchorRole, caps: &Captures<'_>) -> Option<Self> {
        let id = caps.get(2)?;
        Some(Self {
            role,
            id: id.as_str().to_string(),
            anchor: (id.start() - 1)..(id.end() + 1),
        })
    }

    pub fn is_start(&self) -> bool {
        self.role == AnchorRole::Link
    }
}

/// Match the request-start pattern against a line
pub fn match_request_start(line: &str) -> Option<RequestMarker> {
    REQUEST_START
        .captures(line)
        .and_then(|caps| RequestMarker::from_captures(AnchorRole::Link, &caps))
}

/// Match the request-end pattern against a line
pub fn match_request_end(line: &str) -> Option<RequestMarker> {
    REQUEST_END
        .captures(line)
        .and_then(|caps| RequestMarker::from_captures(AnchorRole::Target, &caps))
}

/// Start pattern first, then end pattern
pub fn detect_request_marker(line: &str) -> Option<RequestMarker> {
    match_request_start(line).or_else(|| match_request_end(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_marker() {
        let line = "GET /x [42] -> GET /x";
        let marker = match_request_start(line).unwrap();
        assert_eq!(marker.id, "42");
        assert_eq!(&line[marker.anchor.clone()], "[42]");
        assert!(marker.is_start());
    }

    #[test]
    fn test_end_marker() {
        let line = "GET /x [42] <- 200 OK";
        let marker = match_request_end(line).unwrap();
        assert_eq!(marker.id, "42");
        assert_eq!(marker.role, AnchorRole::Target);
        assert_eq!(&line[..marker.anchor.start], "GET /x ");
        assert_eq!(&line[marker.anchor.end..], " <- 200 OK");
    }

    #[test]
    fn test_all_methods_start_requests() {
        for method in ["GET", "POST", "PUT", "HEAD", "DELETE"] {
            let line = format!("t [7] -> {method} /path HTTP/1.1");
            assert!(match_request_start(&line).is_some(), "{method}");
        }
    }

    #[test]
    fn test_unknown_method_is_not_a_start() {
        assert!(match_request_start("t [7] -> PATCH /path HTTP/1.1").is_none());
        assert!(detect_request_marker("t [7] -> PATCH /path HTTP/1.1").is_none());
    }

    #[test]
    fn test_method_is_case_sensitive() {
        assert!(match_request_start("t [7] -> get /path").is_none());
    }

    #[test]
    fn test_prefix_needs_trailing_space() {
        assert!(match_request_start("[7] -> GET /path").is_none());
        assert!(match_request_start("t[7] -> GET /path").is_none());
    }

    #[test]
    fn test_end_needs_status_digits() {
        assert!(match_request_end("t [7] <- OK done").is_none());
        assert!(match_request_end("t [7] <- 404 Not Found").is_some());
    }

    #[test]
    fn test_greedy_prefix_uses_last_marker() {
        let line = "a [1] -> GET b [2] -> GET /c";
        let marker = match_request_start(line).unwrap();
        assert_eq!(marker.id, "2");
    }

    #[test]
    fn test_detect_prefers_start() {
        let marker = detect_request_marker("x [9] -> POST /y").unwrap();
        assert!(marker.is_start());
        let marker = detect_request_marker("x [9] <- 201 Created").unwrap();
        assert!(!marker.is_start());
    }

    #[test]
    fn test_repeated_matching_is_stateless() {
        let line = "GET /x [42] -> GET /x";
        for _ in 0..3 {
            assert_eq!(match_request_start(line).unwrap().id, "42");
        }
    }
}
