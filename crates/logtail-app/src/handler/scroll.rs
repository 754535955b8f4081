//! Scroll message handlers
//!
//! Vertical scrolling drives follow mode: scrolling away from the bottom turns
//! it off, reaching the bottom turns it back on.

use crate::log_view_state::LogViewState;
use crate::state::AppState;

use super::UpdateResult;

fn scroll_with(state: &mut AppState, op: impl FnOnce(&mut LogViewState)) -> UpdateResult {
    sync_content_size(state);
    op(&mut state.log_view_state);
    state.tail.set_follow(state.log_view_state.auto_scroll);
    UpdateResult::none()
}

pub fn handle_scroll_up(state: &mut AppState) -> UpdateResult {
    scroll_with(state, |view| view.scroll_up(1))
}

pub fn handle_scroll_down(state: &mut AppState) -> UpdateResult {
    scroll_with(state, |view| view.scroll_down(1))
}

pub fn handle_scroll_to_top(state: &mut AppState) -> UpdateResult {
    scroll_with(state, LogViewState::scroll_to_top)
}

pub fn handle_scroll_to_bottom(state: &mut AppState) -> UpdateResult {
    scroll_with(state, LogViewState::scroll_to_bottom)
}

pub fn handle_page_up(state: &mut AppState) -> UpdateResult {
    scroll_with(state, LogViewState::page_up)
}

pub fn handle_page_down(state: &mut AppState) -> UpdateResult {
    scroll_with(state, LogViewState::page_down)
}

pub fn handle_scroll_left(state: &mut AppState, n: usize) -> UpdateResult {
    state.log_view_state.scroll_left(n);
    UpdateResult::none()
}

pub fn handle_scroll_right(state: &mut AppState, n: usize) -> UpdateResult {
    state.log_view_state.scroll_right(n);
    UpdateResult::none()
}

/// Bring the scroll bounds up to date with the tail view.
///
/// The viewport height is only known after a render; until then it stays 0.
pub(crate) fn sync_content_size(state: &mut AppState) {
    let visible = state.log_view_state.visible_lines;
    state
        .log_view_state
        .update_content_size(state.tail.visible_len(), visible);
}

/// Put visible line `index` at the top of the viewport and stop following
pub(crate) fn jump_to(state: &mut AppState, index: usize) {
    sync_content_size(state);
    state.log_view_state.jump_to(index);
    state.tail.set_follow(false);
}
