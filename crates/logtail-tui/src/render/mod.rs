//! Main render/view function (View in TEA pattern)


use logtail_app::{AppState, ConnectionState};
use ratatui::Frame;

use super::{layout, widgets};

/// Render the complete UI (View function in TEA)
///
/// Only the log view state is written, to record the viewport size and the
/// focused line.
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let areas = layout::create(frame.area());

    frame.render_widget(widgets::Header::new(state), areas.header);

    let mut log_view = widgets::LogView::new(&state.tail)
        .show_line_numbers(state.settings.ui.show_line_numbers)
        .focused(!state.ui_mode.is_prompt());
    if let Some(hint) = empty_hint(state) {
        log_view = log_view.empty_hint(hint);
    }
    frame.render_stateful_widget(log_view, areas.logs, &mut state.log_view_state);

    if state.ui_mode.is_prompt() {
        frame.render_widget(widgets::PromptInput::new(state), areas.status);
    } else {
        frame.render_widget(widgets::StatusBar::new(state), areas.status);
    }
}

/// What to tell the user while nothing has arrived yet
fn empty_hint(state: &AppState) -> Option<&'static str> {
    if state.tail_request.is_none() {
        Some("Press o to choose a log file")
    } else if state.connection != ConnectionState::Connected {
        Some("Waiting for the server connection")
    } else {
        None
    }
}
