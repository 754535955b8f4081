//! Log view operation handlers
//!
//! Visibility toggles, the filter/file prompt, session clearing and
//! match/request navigation.

use logtail_client::TailRequest;
use logtail_core::prelude::*;

use crate::state::{AppState, StatusLevel, UiMode};

use super::scroll::{jump_to, sync_content_size};
use super::{UpdateAction, UpdateResult};

// ─────────────────────────────────────────────────────────────────────────────
// Toggles
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_toggle_follow(state: &mut AppState) -> UpdateResult {
    let follow = state.tail.toggle_follow();
    state.set_follow(follow);
    UpdateResult::none()
}

pub fn handle_toggle_error_focus(state: &mut AppState) -> UpdateResult {
    let on = keep_focus(state, |state| state.tail.toggle_error_focus());
    debug!("Error focus {}", if on { "on" } else { "off" });
    UpdateResult::none()
}

/// Without a filter no entry is matched, so match-only shows sections only
pub const NO_FILTER_MATCHED_ONLY: &str = "No filter set; only error and warning lines are shown";

pub fn handle_toggle_matched_only(state: &mut AppState) -> UpdateResult {
    let on = keep_focus(state, |state| state.tail.toggle_matched_only());
    if on && state.tail.filter_pattern().is_none() {
        state.set_status(StatusLevel::Info, NO_FILTER_MATCHED_ONLY);
    }
    UpdateResult::none()
}

/// Run a visibility change and keep the top line in place when not following
fn keep_focus<T>(state: &mut AppState, change: impl FnOnce(&mut AppState) -> T) -> T {
    let anchor = state.tail.seq_of_visible(state.log_view_state.offset);
    let result = change(state);

    if !state.log_view_state.auto_scroll {
        state.log_view_state.offset = anchor
            .map(|seq| state.tail.visible_index_at_or_after(seq))
            .unwrap_or(0);
    }
    sync_content_size(state);
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Filter
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_set_filter(state: &mut AppState, pattern: &str) -> UpdateResult {
    let applied = keep_focus(state, |state| state.apply_filter(pattern));
    if applied {
        let text = match state.tail.filter_pattern() {
            Some(pattern) => format!("Filter: {pattern}"),
            None => "Filter cleared".to_string(),
        };
        state.set_status(StatusLevel::Info, text);
    } else {
        warn!("Rejected filter expression '{}'", pattern);
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Prompt
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_start_filter_input(state: &mut AppState) -> UpdateResult {
    state.prompt = state.tail.filter_pattern().unwrap_or_default().to_string();
    state.filter_error = None;
    state.ui_mode = UiMode::FilterInput;
    UpdateResult::none()
}

pub fn handle_start_file_input(state: &mut AppState) -> UpdateResult {
    state.prompt = state
        .tail_request
        .as_ref()
        .map(|r| r.file.clone())
        .unwrap_or_default();
    state.ui_mode = UiMode::FileInput;
    UpdateResult::none()
}

pub fn handle_prompt_char(state: &mut AppState, c: char) -> UpdateResult {
    if state.ui_mode.is_prompt() {
        state.prompt.push(c);
    }
    UpdateResult::none()
}

pub fn handle_prompt_backspace(state: &mut AppState) -> UpdateResult {
    state.prompt.pop();
    UpdateResult::none()
}

pub fn handle_prompt_clear(state: &mut AppState) -> UpdateResult {
    state.prompt.clear();
    UpdateResult::none()
}

pub fn handle_prompt_cancel(state: &mut AppState) -> UpdateResult {
    state.prompt.clear();
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}

/// Submit the prompt. A rejected filter keeps the prompt open for correction.
pub fn handle_prompt_submit(state: &mut AppState) -> UpdateResult {
    let text = std::mem::take(&mut state.prompt);
    match state.ui_mode {
        UiMode::FilterInput => {
            let result = handle_set_filter(state, &text);
            if state.filter_error.is_some() {
                state.prompt = text;
            } else {
                state.ui_mode = UiMode::Normal;
            }
            result
        }
        UiMode::FileInput => {
            state.ui_mode = UiMode::Normal;
            handle_select_file(state, &text)
        }
        UiMode::Normal => UpdateResult::none(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// Switch to another file: new session, new tail request
pub fn handle_select_file(state: &mut AppState, file: &str) -> UpdateResult {
    let file = file.trim();
    if file.is_empty() {
        state.set_status(StatusLevel::Warning, "No file given");
        return UpdateResult::none();
    }

    let amount = state
        .tail_request
        .as_ref()
        .map(|r| r.amount_mb)
        .unwrap_or(state.settings.tail.amount_mb);
    let request = TailRequest::new(file, amount);

    info!("Switching tail to {}", request.to_command());
    state.tail_request = Some(request.clone());
    // The transport reopens for the new file; its Connected resets again and
    // drops whatever of the old file was still queued
    state.reset_session();
    state.set_status(StatusLevel::Info, format!("Tailing {file}"));
    UpdateResult::action(UpdateAction::RequestTail(request))
}

/// Clear the view and ask the server for the tail again
pub fn handle_clear_view(state: &mut AppState) -> UpdateResult {
    state.reset_session();
    match state.tail_request.clone() {
        Some(request) => UpdateResult::action(UpdateAction::RequestTail(request)),
        None => UpdateResult::none(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Navigation
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_next_match(state: &mut AppState) -> UpdateResult {
    if state.tail.filter_pattern().is_none() {
        state.set_status(StatusLevel::Warning, "No filter set");
        return UpdateResult::none();
    }
    match state.tail.next_match(state.log_view_state.offset) {
        Some(index) => jump_to(state, index),
        None => state.set_status(StatusLevel::Info, "No further match"),
    }
    UpdateResult::none()
}

pub fn handle_previous_match(state: &mut AppState) -> UpdateResult {
    if state.tail.filter_pattern().is_none() {
        state.set_status(StatusLevel::Warning, "No filter set");
        return UpdateResult::none();
    }
    match state.tail.prev_match(state.log_view_state.offset) {
        Some(index) => jump_to(state, index),
        None => state.set_status(StatusLevel::Info, "No earlier match"),
    }
    UpdateResult::none()
}

/// Jump from the first request start in view to its paired end
pub fn handle_follow_request_link(state: &mut AppState) -> UpdateResult {
    sync_content_size(state);
    let view = &state.log_view_state;
    let rows = view.visible_lines.max(1);
    let Some(start) = state.tail.find_request_start(view.offset, view.offset + rows) else {
        state.set_status(StatusLevel::Info, "No request start in view");
        return UpdateResult::none();
    };

    match state.tail.find_request_end(start) {
        Some(end) => jump_to(state, end),
        None => {
            let label = state
                .tail
                .visible_line(start)
                .and_then(|l| l.as_entry())
                .and_then(|e| e.anchor_label())
                .unwrap_or_default()
                .to_string();
            state.set_status(StatusLevel::Info, format!("Request {label} has not ended yet"));
        }
    }
    UpdateResult::none()
}
