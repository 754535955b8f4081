//! Message types for the application (TEA pattern)

use logtail_client::TransportEvent;

use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Event from the tail transport
    Transport(TransportEvent),

    /// Quit the application
    Quit,

    // ─────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    PageUp,
    PageDown,
    ScrollLeft(usize),
    ScrollRight(usize),

    // ─────────────────────────────────────────────────────────
    // View toggles
    // ─────────────────────────────────────────────────────────
    ToggleFollow,
    ToggleErrorFocus,
    ToggleMatchedOnly,

    // ─────────────────────────────────────────────────────────
    // Prompt (filter and file input)
    // ─────────────────────────────────────────────────────────
    /// Open the filter prompt, prefilled with the active pattern
    StartFilterInput,
    /// Open the file prompt, prefilled with the tailed file
    StartFileInput,
    PromptChar(char),
    PromptBackspace,
    /// Ctrl+U: clear the prompt text
    PromptClear,
    PromptSubmit,
    PromptCancel,

    // ─────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────
    /// Replace the find filter (empty clears it)
    SetFilter(String),
    /// Tail another file from the server
    SelectFile(String),
    /// Empty the view and request the tail again
    ClearView,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    NextMatch,
    PreviousMatch,
    /// Jump from a request start to its end
    FollowRequestLink,
}
