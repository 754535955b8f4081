//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `scroll`: Scroll handlers
//! - `log_view`: View toggles, filter, prompt and navigation
//! - `transport`: Transport event handling

pub(crate) mod keys;
pub(crate) mod log_view;
pub(crate) mod scroll;
pub(crate) mod transport;
pub(crate) mod update;


use logtail_client::TailRequest;

use crate::message::Message;

pub use keys::handle_key;
pub use update::update;

/// Actions that the engine should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Send a tail command for the given file
    RequestTail(TailRequest),
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the engine to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
