//! Transport event handling
//!
//! Connection changes are mirrored into the app state and surfaced as
//! informational lines in the view. Every successful (re)connect starts a new
//! session, because the client re-requests the tail right after it.

use logtail_client::{ConnectionState, TransportEvent};
use logtail_core::prelude::*;

use crate::state::{AppState, StatusLevel};

use super::scroll::sync_content_size;
use super::UpdateResult;

/// Shown when an open connection drops
pub const CONNECTION_LOST: &str = "Connection to server lost. Trying to reconnect ...";

pub fn handle_transport_event(state: &mut AppState, event: TransportEvent) -> UpdateResult {
    match event {
        TransportEvent::Connected { attempt } => {
            debug!("Connected after {} attempt(s); starting new session", attempt);
            state.connection = ConnectionState::Connected;
            state.reset_session();
            let text = if state.tail_request.is_some() {
                "Connected"
            } else {
                "Connected; press 'o' to choose a log file"
            };
            state.set_status(StatusLevel::Info, text);
        }
        TransportEvent::Disconnected { reason } => {
            debug!("Disconnected: {}", reason);
            state.connection = ConnectionState::Reconnecting { attempt: 1 };
            push_info(state, CONNECTION_LOST);
            state.set_status(StatusLevel::Warning, format!("Connection lost: {reason}"));
        }
        TransportEvent::ConnectFailed { message } => {
            let err = Error::connection(message);
            state.connection = match state.connection {
                ConnectionState::Reconnecting { attempt } => ConnectionState::Reconnecting {
                    attempt: attempt.saturating_add(1),
                },
                _ => ConnectionState::Reconnecting { attempt: 1 },
            };
            push_info(state, err.to_string());
            state.set_status(StatusLevel::Error, err.to_string());
        }
        TransportEvent::Data(chunk) => {
            state.tail.ingest(&chunk);
            after_append(state);
        }
        TransportEvent::Info(text) => push_info(state, text),
    }
    UpdateResult::none()
}

fn push_info(state: &mut AppState, text: impl Into<String>) {
    state.tail.push_info(text);
    after_append(state);
}

fn after_append(state: &mut AppState) {
    let evicted = state.tail.take_evicted_visible();
    state.log_view_state.shift_up(evicted);
    sync_content_size(state);
}
