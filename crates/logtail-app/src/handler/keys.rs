//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Columns moved per horizontal scroll step
const H_SCROLL_STEP: usize = 8;

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Normal => handle_key_normal(key),
        UiMode::FilterInput | UiMode::FileInput => handle_key_prompt(key),
    }
}

fn handle_key_normal(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),

        // Scrolling
        InputKey::Char('j') | InputKey::Down => Some(Message::ScrollDown),
        InputKey::Char('k') | InputKey::Up => Some(Message::ScrollUp),
        InputKey::Char('h') | InputKey::Left => Some(Message::ScrollLeft(H_SCROLL_STEP)),
        InputKey::Char('l') | InputKey::Right => Some(Message::ScrollRight(H_SCROLL_STEP)),
        InputKey::Char('g') | InputKey::Home => Some(Message::ScrollToTop),
        InputKey::Char('G') | InputKey::End => Some(Message::ScrollToBottom),
        InputKey::PageUp => Some(Message::PageUp),
        InputKey::PageDown => Some(Message::PageDown),

        // Toggles
        InputKey::Char('f') => Some(Message::ToggleFollow),
        InputKey::Char('e') => Some(Message::ToggleErrorFocus),
        InputKey::Char('m') => Some(Message::ToggleMatchedOnly),

        // Prompts
        InputKey::Char('/') => Some(Message::StartFilterInput),
        InputKey::Char('o') => Some(Message::StartFileInput),

        // Navigation
        InputKey::Char('n') => Some(Message::NextMatch),
        InputKey::Char('N') => Some(Message::PreviousMatch),
        InputKey::Char('r') | InputKey::Enter => Some(Message::FollowRequestLink),

        InputKey::Char('c') => Some(Message::ClearView),

        _ => None,
    }
}

fn handle_key_prompt(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::PromptCancel),
        InputKey::Enter => Some(Message::PromptSubmit),
        InputKey::Backspace => Some(Message::PromptBackspace),
        InputKey::CharCtrl('u') => Some(Message::PromptClear),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Char(c) => Some(Message::PromptChar(c)),
        _ => None,
    }
}
