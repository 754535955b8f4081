//! Message processing and action dispatch

use logtail_client::TailClient;
use logtail_core::prelude::*;

use crate::handler::{self, UpdateAction};
use crate::message::Message;
use crate::state::{AppState, StatusLevel};

/// Process a message through the TEA update function, following up messages
/// until none remain. Returns every dispatched action.
pub fn process_message(
    state: &mut AppState,
    message: Message,
    client: Option<&TailClient>,
) -> Vec<UpdateAction> {
    let mut dispatched = Vec::new();

    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(state, &action, client);
            dispatched.push(action);
        }

        msg = result.message;
    }

    dispatched
}

fn handle_action(state: &mut AppState, action: &UpdateAction, client: Option<&TailClient>) {
    match action {
        UpdateAction::RequestTail(request) => {
            let Some(client) = client else {
                debug!("No transport running; {} kept for later", request.to_command());
                return;
            };
            if let Err(e) = client.request_tail(request.clone()) {
                warn!("Failed to request tail: {}", e);
                // A full queue clears up; a closed one does not
                let level = if e.is_recoverable() {
                    StatusLevel::Warning
                } else {
                    StatusLevel::Error
                };
                state.set_status(level, e.to_string());
            }
        }
    }
}
