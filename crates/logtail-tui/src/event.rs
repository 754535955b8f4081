//! Terminal event polling

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use logtail_app::message::Message;
use logtail_app::InputKey;
use logtail_core::prelude::*;
use std::time::Duration;

/// How long one poll waits for input before the loop redraws (20 FPS)
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Map a crossterm key to the frontend-neutral [`InputKey`]; keys without a
/// binding anywhere in the app map to `None`
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        _ => None,
    }
}

/// Poll for terminal events with timeout.
///
/// Returns `Ok(None)` on timeout and for events that carry no input; the
/// caller redraws either way, so new log data shows up without a key press.
pub fn poll() -> Result<Option<Message>> {
    if !event::poll(POLL_TIMEOUT)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) if key.kind == event::KeyEventKind::Press => {
            Ok(key_event_to_input(key).map(Message::Key))
        }
        _ => Ok(None),
    }
}
