//! Headless mode - NDJSON event output instead of the terminal view
//!
//! Every classified line and every connection change becomes one JSON object
//! on stdout, so scripts and tests can follow a tail without parsing ANSI
//! output.
//!
//! # Example Output
//!
//! ```json
//! {"event":"tail_requested","file":"logs/error.log","amount_mb":1,"timestamp":1704700000000}
//! {"event":"connected","attempt":1,"timestamp":1704700000100}
//! {"event":"entry","text":"01.01.2024 10:00:01 *ERROR* [main] boom","kind":"error_start","severity":"error","matched":false,"section_id":1,"correlation_id":null,"highlights":[],"timestamp":1704700000200}
//! ```

pub mod runner;

use std::io::{self, Write};
use std::ops::Range;

use chrono::Utc;
use logtail_app::{EngineEvent, ViewLine};
use logtail_core::{EntryKind, SectionId, Severity};
use serde::Serialize;
use tracing::error;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Transport connected
    Connected { attempt: u32, timestamp: i64 },

    /// An open connection was lost; a reconnect follows
    Disconnected { reason: String, timestamp: i64 },

    /// A connection attempt failed; another follows
    ConnectFailed { message: String, timestamp: i64 },

    /// The view was emptied; entries after this belong to a new tail
    SessionReset { timestamp: i64 },

    /// A tail command was handed to the transport
    TailRequested {
        file: String,
        amount_mb: u32,
        timestamp: i64,
    },

    /// One classified log line
    Entry {
        text: String,
        kind: EntryKind,
        severity: Option<Severity>,
        matched: bool,
        section_id: Option<SectionId>,
        correlation_id: Option<String>,
        /// Byte ranges of filter matches within `text`
        highlights: Vec<Range<usize>>,
        timestamp: i64,
    },

    /// Informational line from the server or the client
    Info { text: String, timestamp: i64 },

    FilterChanged {
        pattern: Option<String>,
        timestamp: i64,
    },

    /// A filter expression was rejected; the previous filter stays
    FilterRejected { message: String, timestamp: i64 },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },

    Shutdown { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // Write to stdout with newline (NDJSON format)
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn line(line: &ViewLine) -> Self {
        match line {
            ViewLine::Entry(entry) => Self::Entry {
                text: entry.text.clone(),
                kind: entry.kind,
                severity: entry.severity,
                matched: entry.matched,
                section_id: entry.section_id,
                correlation_id: entry.correlation_id.clone(),
                highlights: entry.highlights.clone(),
                timestamp: entry.received_at.timestamp_millis(),
            },
            ViewLine::Info(info) => Self::Info {
                text: info.text.clone(),
                timestamp: info.received_at.timestamp_millis(),
            },
        }
    }

    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
            timestamp: Self::now(),
        }
    }

    /// Translate one engine event; a batch of lines becomes one event per line
    pub fn from_engine_event(event: &EngineEvent) -> Vec<Self> {
        let timestamp = Self::now();
        let single = match event {
            EngineEvent::Lines(lines) => return lines.iter().map(Self::line).collect(),
            EngineEvent::Connected { attempt } => Self::Connected {
                attempt: *attempt,
                timestamp,
            },
            EngineEvent::Disconnected { reason } => Self::Disconnected {
                reason: reason.clone(),
                timestamp,
            },
            EngineEvent::ConnectFailed { message } => Self::ConnectFailed {
                message: message.clone(),
                timestamp,
            },
            EngineEvent::SessionReset => Self::SessionReset { timestamp },
            EngineEvent::TailRequested { file, amount_mb } => Self::TailRequested {
                file: file.clone(),
                amount_mb: *amount_mb,
                timestamp,
            },
            EngineEvent::FilterChanged { pattern } => Self::FilterChanged {
                pattern: pattern.clone(),
                timestamp,
            },
            EngineEvent::FilterRejected { message } => Self::FilterRejected {
                message: message.clone(),
                timestamp,
            },
            EngineEvent::Shutdown => Self::Shutdown { timestamp },
        };
        vec![single]
    }
}
