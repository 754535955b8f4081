//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON.

use crate::tail_view::ViewLine;

#[derive(Debug, Clone)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Connection
    // ─────────────────────────────────────────────────────────
    /// The transport connected; `attempt` counts the dials it took
    Connected { attempt: u32 },

    /// An open connection was lost
    Disconnected { reason: String },

    /// A connection attempt failed
    ConnectFailed { message: String },

    // ─────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────
    /// The view was emptied for a new session
    SessionReset,

    /// A tail command was handed to the transport
    TailRequested { file: String, amount_mb: u32 },

    /// Lines appended to the view, in order
    Lines(Vec<ViewLine>),

    // ─────────────────────────────────────────────────────────
    // Filter
    // ─────────────────────────────────────────────────────────
    FilterChanged { pattern: Option<String> },

    /// An expression was rejected; the previous filter stays
    FilterRejected { message: String },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Snake-case label, used for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::Disconnected { .. } => "disconnected",
            Self::ConnectFailed { .. } => "connect_failed",
            Self::SessionReset => "session_reset",
            Self::TailRequested { .. } => "tail_requested",
            Self::Lines(_) => "lines",
            Self::FilterChanged { .. } => "filter_changed",
            Self::FilterRejected { .. } => "filter_rejected",
            Self::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_event_type_labels() {
        assert_eq!(EngineEvent::Shutdown.event_type(), "shutdown");
        assert_eq!(EngineEvent::Lines(Vec::new()).event_type(), "lines");
        assert_eq!(
            EngineEvent::FilterRejected {
                message: String::new()
            }
            .event_type(),
            "filter_rejected"
        );
    }
}
