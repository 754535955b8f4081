//! Status bar widget
//!
//! Follow and visibility modes, section counts, scroll position and the last
//! status message.

use logtail_app::{AppState, SectionCounts};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

use super::truncate_to_width;

/// Below this width the position and warning count are left out
const COMPACT_WIDTH: u16 = 60;

/// Status bar widget showing application state
pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn follow_indicator(&self) -> Span<'static> {
        if self.state.tail.follow() {
            Span::styled("⬇ Follow", Style::default().fg(palette::STATUS_GREEN))
        } else {
            Span::styled("⬆ Paused", Style::default().fg(palette::STATUS_YELLOW))
        }
    }

    /// Active visibility modes as badges
    fn mode_badges(&self) -> Vec<Span<'static>> {
        let view = self.state.tail.view_filter();
        let mut badges = Vec::new();
        if view.error_focused {
            badges.push(Span::styled(" ERRORS ", styles::badge_active()));
        }
        if view.show_matched_only {
            badges.push(Span::styled(" MATCHES ", styles::badge_active()));
        }
        badges
    }

    fn error_count(counts: SectionCounts) -> Span<'static> {
        match counts.errors {
            0 => Span::styled("✓ No errors", styles::text_muted()),
            1 => Span::styled(
                "✗ 1 error",
                Style::default()
                    .fg(palette::STATUS_RED)
                    .add_modifier(Modifier::BOLD),
            ),
            n => Span::styled(
                format!("✗ {} errors", n),
                Style::default()
                    .fg(palette::STATUS_RED)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }

    fn warning_count(counts: SectionCounts) -> Option<Span<'static>> {
        match counts.warnings {
            0 => None,
            1 => Some(Span::styled(
                "⚠ 1 warning",
                Style::default().fg(palette::STATUS_YELLOW),
            )),
            n => Some(Span::styled(
                format!("⚠ {} warnings", n),
                Style::default().fg(palette::STATUS_YELLOW),
            )),
        }
    }

    fn log_position(&self) -> String {
        let view = &self.state.log_view_state;
        if view.total_lines == 0 {
            "0/0".to_string()
        } else {
            let current = view.offset + 1;
            let end = (view.offset + view.visible_lines).min(view.total_lines);
            format!("{}-{}/{}", current, end, view.total_lines)
        }
    }

    fn build_segments(&self, compact: bool) -> Vec<Span<'static>> {
        let separator = Span::styled(" │ ", styles::text_muted());
        let counts = self.state.tail.counts();

        let mut segments = vec![Span::raw(" "), self.follow_indicator()];

        for badge in self.mode_badges() {
            segments.push(Span::raw(" "));
            segments.push(badge);
        }

        segments.push(separator.clone());
        segments.push(Self::error_count(counts));

        if !compact {
            if let Some(warnings) = Self::warning_count(counts) {
                segments.push(separator.clone());
                segments.push(warnings);
            }

            segments.push(separator.clone());
            segments.push(Span::styled(self.log_position(), styles::text_muted()));
        }

        segments
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut segments = self.build_segments(area.width < COMPACT_WIDTH);

        if let Some(status) = &self.state.status {
            let used: usize = segments.iter().map(|s| s.width()).sum();
            let room = (area.width as usize).saturating_sub(used + 4);
            if room > 0 {
                segments.push(Span::styled(" │ ", styles::text_muted()));
                segments.push(Span::styled(
                    truncate_to_width(&status.text, room),
                    styles::status_level(status.level),
                ));
            }
        }

        Paragraph::new(Line::from(segments)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_state, TestTerminal};
    use logtail_app::StatusLevel;

    fn render(state: &AppState, width: u16) -> TestTerminal {
        let mut term = TestTerminal::with_size(width, 1);
        let area = term.area();
        term.render_widget(StatusBar::new(state), area);
        term
    }

    #[test]
    fn test_status_bar_defaults() {
        let state = create_test_state();
        let term = render(&state, 100);

        assert!(term.buffer_contains("⬇ Follow"));
        assert!(term.buffer_contains("✓ No errors"));
        assert!(term.buffer_contains("0/0"));
        assert!(!term.buffer_contains("ERRORS"));
    }

    #[test]
    fn test_status_bar_counts_sections() {
        let mut state = create_test_state();
        state.tail.ingest(
            "01 *ERROR* one\n02 *ERROR* two\n03 *WARN* three\n04 plain\n",
        );
        let term = render(&state, 100);

        assert!(term.buffer_contains("✗ 2 errors"));
        assert!(term.buffer_contains("⚠ 1 warning"));
    }

    #[test]
    fn test_status_bar_mode_badges() {
        let mut state = create_test_state();
        state.tail.toggle_error_focus();
        state.tail.toggle_matched_only();
        state.set_follow(false);
        let term = render(&state, 100);

        assert!(term.buffer_contains("ERRORS"));
        assert!(term.buffer_contains("MATCHES"));
        assert!(term.buffer_contains("⬆ Paused"));
    }

    #[test]
    fn test_status_bar_position() {
        let mut state = create_test_state();
        state.log_view_state.total_lines = 100;
        state.log_view_state.visible_lines = 20;
        state.log_view_state.offset = 10;
        let term = render(&state, 100);

        assert!(term.buffer_contains("11-30/100"));
    }

    #[test]
    fn test_status_bar_shows_status_message() {
        let mut state = create_test_state();
        state.set_status(StatusLevel::Error, "Invalid filter expression '(': unclosed group");
        let term = render(&state, 120);

        assert!(term.buffer_contains("Invalid filter expression '('"));
        let x = term.line(0).find("Invalid").map(|i| term.line(0)[..i].chars().count() as u16);
        let cell = &term.buffer()[(x.expect("message rendered"), 0)];
        assert_eq!(cell.fg, palette::STATUS_RED);
    }

    #[test]
    fn test_status_bar_compact_drops_position() {
        let mut state = create_test_state();
        state.log_view_state.total_lines = 100;
        state.log_view_state.visible_lines = 20;
        let term = render(&state, 40);

        assert!(term.buffer_contains("Follow"));
        assert!(!term.buffer_contains("/100"));
    }
}
