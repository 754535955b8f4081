//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::{AppPhase, AppState};

use super::{keys, log_view, scroll, transport, UpdateResult};

/// Process a message and update state
/// Returns an optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => match keys::handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Transport(event) => transport::handle_transport_event(state, event),

        // ─────────────────────────────────────────────────────────
        // Scrolling
        // ─────────────────────────────────────────────────────────
        Message::ScrollUp => scroll::handle_scroll_up(state),
        Message::ScrollDown => scroll::handle_scroll_down(state),
        Message::ScrollToTop => scroll::handle_scroll_to_top(state),
        Message::ScrollToBottom => scroll::handle_scroll_to_bottom(state),
        Message::PageUp => scroll::handle_page_up(state),
        Message::PageDown => scroll::handle_page_down(state),
        Message::ScrollLeft(n) => scroll::handle_scroll_left(state, n),
        Message::ScrollRight(n) => scroll::handle_scroll_right(state, n),

        // ─────────────────────────────────────────────────────────
        // View toggles
        // ─────────────────────────────────────────────────────────
        Message::ToggleFollow => log_view::handle_toggle_follow(state),
        Message::ToggleErrorFocus => log_view::handle_toggle_error_focus(state),
        Message::ToggleMatchedOnly => log_view::handle_toggle_matched_only(state),

        // ─────────────────────────────────────────────────────────
        // Prompt
        // ─────────────────────────────────────────────────────────
        Message::StartFilterInput => log_view::handle_start_filter_input(state),
        Message::StartFileInput => log_view::handle_start_file_input(state),
        Message::PromptChar(c) => log_view::handle_prompt_char(state, c),
        Message::PromptBackspace => log_view::handle_prompt_backspace(state),
        Message::PromptClear => log_view::handle_prompt_clear(state),
        Message::PromptSubmit => log_view::handle_prompt_submit(state),
        Message::PromptCancel => log_view::handle_prompt_cancel(state),

        // ─────────────────────────────────────────────────────────
        // Session
        // ─────────────────────────────────────────────────────────
        Message::SetFilter(pattern) => log_view::handle_set_filter(state, &pattern),
        Message::SelectFile(file) => log_view::handle_select_file(state, &file),
        Message::ClearView => log_view::handle_clear_view(state),

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::NextMatch => log_view::handle_next_match(state),
        Message::PreviousMatch => log_view::handle_previous_match(state),
        Message::FollowRequestLink => log_view::handle_follow_request_link(state),
    }
}
