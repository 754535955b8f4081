//! Chunking must never change what the tail produces.
//!
//! The transport delivers arbitrary fragments, so every split of the same
//! text has to yield the same lines with the same classification.

use logtail_app::{TailView, ViewLine};
use logtail_core::{EntryKind, LogStreamState, SectionId, Severity};

const ERROR_LOG: &str = include_str!("fixtures/error.log");
const REQUEST_LOG: &str = include_str!("fixtures/request.log");

type Summary = (
    String,
    EntryKind,
    Option<Severity>,
    Option<SectionId>,
    Option<String>,
    bool,
);

fn summarize<'a>(lines: impl Iterator<Item = &'a ViewLine>) -> Vec<Summary> {
    lines
        .filter_map(ViewLine::as_entry)
        .map(|e| {
            (
                e.text.clone(),
                e.kind,
                e.severity,
                e.section_id,
                e.correlation_id.clone(),
                e.matched,
            )
        })
        .collect()
}

fn ingest_in_chunks(text: &str, chunk_len: usize, filter: Option<&str>) -> Vec<Summary> {
    let mut tail = TailView::new(1_000);
    if let Some(pattern) = filter {
        tail.set_filter(pattern).unwrap();
    }
    let bytes = text.as_bytes();
    for chunk in bytes.chunks(chunk_len) {
        tail.ingest(std::str::from_utf8(chunk).unwrap());
    }
    summarize(tail.lines_since(0))
}

fn ingest_split_at(text: &str, at: usize) -> Vec<Summary> {
    let mut tail = TailView::new(1_000);
    let (head, rest) = text.split_at(at);
    tail.ingest(head);
    tail.ingest(rest);
    summarize(tail.lines_since(0))
}

#[test]
fn test_every_chunk_size_matches_whole_ingest() {
    for log in [ERROR_LOG, REQUEST_LOG] {
        let whole = ingest_in_chunks(log, log.len(), None);
        assert_eq!(whole.len(), log.lines().count());

        for chunk_len in 1..=17 {
            assert_eq!(
                ingest_in_chunks(log, chunk_len, None),
                whole,
                "chunk length {}",
                chunk_len
            );
        }
    }
}

#[test]
fn test_every_two_way_split_matches_whole_ingest() {
    let whole = ingest_in_chunks(ERROR_LOG, ERROR_LOG.len(), None);
    for at in 0..=ERROR_LOG.len() {
        assert_eq!(ingest_split_at(ERROR_LOG, at), whole, "split at {}", at);
    }
}

#[test]
fn test_filter_matches_do_not_depend_on_chunking() {
    let whole = ingest_in_chunks(ERROR_LOG, ERROR_LOG.len(), Some("org\\.example\\.cache"));
    assert_eq!(whole.iter().filter(|s| s.5).count(), 2);
    assert_eq!(ingest_in_chunks(ERROR_LOG, 3, Some("org\\.example\\.cache")), whole);
}

#[test]
fn test_error_fixture_sections() {
    let lines = ingest_in_chunks(ERROR_LOG, 5, None);
    let kinds: Vec<EntryKind> = lines.iter().map(|s| s.1).collect();
    assert_eq!(
        kinds,
        vec![
            EntryKind::Plain,
            EntryKind::ErrorStart,
            EntryKind::ErrorContinuation,
            EntryKind::ErrorContinuation,
            EntryKind::ErrorContinuation,
            EntryKind::ErrorContinuation,
            EntryKind::ErrorContinuation,
            EntryKind::Plain,
            EntryKind::ErrorStart,
            EntryKind::ErrorContinuation,
            EntryKind::Plain,
        ]
    );

    // Continuations carry the section of their start line
    let error_section = lines[1].3;
    assert!(error_section.is_some());
    assert!(lines[2..7].iter().all(|s| s.3 == error_section));
    assert_eq!(lines[8].2, Some(Severity::Warning));
    assert_ne!(lines[8].3, error_section);
}

#[test]
fn test_request_fixture_pairs() {
    let lines = ingest_in_chunks(REQUEST_LOG, 4, None);
    let kinds: Vec<EntryKind> = lines.iter().map(|s| s.1).collect();
    assert_eq!(
        kinds,
        vec![
            EntryKind::RequestStart,
            EntryKind::RequestStart,
            EntryKind::RequestEnd,
            EntryKind::RequestEnd,
        ]
    );
    let ids: Vec<Option<&str>> = lines.iter().map(|s| s.4.as_deref()).collect();
    assert_eq!(ids, vec![Some("41"), Some("42"), Some("41"), Some("42")]);
}

#[test]
fn test_core_processor_agrees_with_tail_view() {
    let mut stream = LogStreamState::new();
    let mut entries = Vec::new();
    for piece in ERROR_LOG.split_inclusive('\t') {
        entries.extend(stream.ingest(piece));
    }
    assert!(stream.pending().is_empty());

    let kinds: Vec<EntryKind> = entries.iter().map(|e| e.kind).collect();
    let expected: Vec<EntryKind> = ingest_in_chunks(ERROR_LOG, 7, None)
        .into_iter()
        .map(|s| s.1)
        .collect();
    assert_eq!(kinds, expected);
}
