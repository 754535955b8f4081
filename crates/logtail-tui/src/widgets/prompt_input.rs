//! Inline prompt widget for the filter expression and the file to tail

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use logtail_app::{AppState, UiMode};

use crate::theme::{palette, styles};

use super::truncate_to_width;

/// Longest rejection message shown next to the prompt
const MAX_ERROR_WIDTH: usize = 40;

/// Inline prompt rendered in place of the status bar
pub struct PromptInput<'a> {
    state: &'a AppState,
}

impl<'a> PromptInput<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn label(&self) -> &'static str {
        match self.state.ui_mode {
            UiMode::FileInput => "file: ",
            UiMode::FilterInput | UiMode::Normal => "/",
        }
    }
}

impl Widget for PromptInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Format: "/query_" or "/query_ (error)"
        let mut spans = vec![
            Span::styled(
                self.label(),
                Style::default()
                    .fg(palette::STATUS_YELLOW)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.state.prompt.clone(), styles::text_primary()),
            Span::styled("_", Style::default().fg(palette::STATUS_YELLOW)),
        ];

        if self.state.ui_mode == UiMode::FilterInput {
            if let Some(error) = &self.state.filter_error {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!("({})", truncate_to_width(error, MAX_ERROR_WIDTH)),
                    Style::default().fg(palette::STATUS_RED),
                ));
            } else if let Some(active) = self.state.tail.filter_pattern() {
                spans.push(Span::styled(
                    format!("  active: /{}/", active),
                    styles::text_muted(),
                ));
            }
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
