//! Header bar widget
//!
//! Server, tailed file and connection state on one row.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use logtail_app::AppState;

use crate::theme::styles;

use unicode_width::UnicodeWidthStr;

use super::truncate_to_width;

/// Main header inside a glass container
pub struct Header<'a> {
    state: &'a AppState,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn right_line(&self) -> Line<'static> {
        let (icon, label, style) = styles::connection_indicator(&self.state.connection);
        Line::from(vec![
            Span::styled(format!("{} {}", icon, label), style),
            Span::raw(" "),
        ])
    }

    fn left_line(&self, max_width: usize) -> Line<'static> {
        let (icon, _label, style) = styles::connection_indicator(&self.state.connection);

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(icon, style),
            Span::raw(" "),
            Span::styled("logtail", styles::accent_bold()),
            Span::styled(" / ", styles::text_muted()),
        ];
        let used: usize = spans.iter().map(|s| s.width()).sum();

        // Server and file share whatever is left
        let url = &self.state.settings.connection.url;
        let file = self.state.file_label();
        let rest = max_width.saturating_sub(used + 3);
        let url_width = url
            .width()
            .min(rest / 3)
            .max(rest.saturating_sub(file.width()))
            .min(url.width());
        let file_width = rest.saturating_sub(url_width);

        spans.push(Span::styled(
            truncate_to_width(url, url_width),
            styles::text_secondary(),
        ));
        spans.push(Span::styled(" / ", styles::text_muted()));
        spans.push(Span::styled(
            truncate_to_width(file, file_width),
            styles::text_primary(),
        ));

        Line::from(spans)
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let right = self.right_line();
        let right_width = (right.width() as u16).min(inner.width);
        let left_width = inner.width.saturating_sub(right_width + 1);

        let left_area = Rect {
            width: left_width,
            height: 1,
            ..inner
        };
        let right_area = Rect {
            x: inner.right() - right_width,
            width: right_width,
            height: 1,
            ..inner
        };

        Paragraph::new(self.left_line(left_width as usize)).render(left_area, buf);
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .render(right_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_state, create_test_state_with_file, TestTerminal};
    use logtail_app::ConnectionState;

    #[test]
    fn test_header_shows_server_file_and_state() {
        let mut state = create_test_state_with_file("logs/error.log");
        state.connection = ConnectionState::Connected;

        let mut term = TestTerminal::with_size(100, 3);
        let area = term.area();
        term.render_widget(Header::new(&state), area);

        assert!(term.line_contains(1, "logtail"));
        assert!(term.line_contains(1, "ws://localhost:8080"));
        assert!(term.line_contains(1, "logs/error.log"));
        assert!(term.line_contains(1, "● Connected"));
    }

    #[test]
    fn test_header_without_file() {
        let state = create_test_state();

        let mut term = TestTerminal::with_size(100, 3);
        let area = term.area();
        term.render_widget(Header::new(&state), area);

        assert!(term.buffer_contains("(no file)"));
        assert!(term.buffer_contains("Connecting"));
    }

    #[test]
    fn test_header_shows_reconnect_attempt() {
        let mut state = create_test_state();
        state.connection = ConnectionState::Reconnecting { attempt: 4 };

        let mut term = TestTerminal::with_size(100, 3);
        let area = term.area();
        term.render_widget(Header::new(&state), area);

        assert!(term.buffer_contains("Reconnecting (attempt 4)"));
    }

    #[test]
    fn test_header_narrow_terminal_keeps_state_visible() {
        let mut state = create_test_state_with_file("very/long/path/to/some/application/error.log");
        state.connection = ConnectionState::Connected;

        let mut term = TestTerminal::with_size(50, 3);
        let area = term.area();
        term.render_widget(Header::new(&state), area);

        assert!(term.line_contains(1, "Connected"));
        assert!(term.line_contains(1, "…"));
    }
}
