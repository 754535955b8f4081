//! TestBackend harness for widget and full-screen rendering tests
//!
//! ```ignore
//! let mut term = TestTerminal::new();
//! term.render_widget(Header::new(&state), term.area());
//! assert!(term.buffer_contains("ws://localhost:8080"));
//! ```

use logtail_app::config::Settings;
use logtail_app::AppState;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{StatefulWidget, Widget};
use ratatui::{Frame, Terminal};

/// Default screen, the size most terminals open with
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("TestBackend never fails");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        self.buffer().area
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.draw_with(|frame| frame.render_widget(widget, area));
    }

    pub fn render_stateful_widget<W, S>(&mut self, widget: W, area: Rect, state: &mut S)
    where
        W: StatefulWidget<State = S>,
    {
        self.draw_with(|frame| frame.render_stateful_widget(widget, area, state));
    }

    /// Draw a whole frame, e.g. with `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("draw to TestBackend");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Symbols of one row, empty when the row is out of range
    pub fn line(&self, y: u16) -> String {
        let buffer = self.buffer();
        if y >= buffer.area.height {
            return String::new();
        }
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    pub fn line_contains(&self, y: u16, text: &str) -> bool {
        self.line(y).contains(text)
    }

    /// Row index of the first line containing `text`
    pub fn find_line(&self, text: &str) -> Option<u16> {
        (0..self.buffer().area.height).find(|&y| self.line_contains(y, text))
    }

    /// Matches within a single row only; text never wraps across rows here
    pub fn buffer_contains(&self, text: &str) -> bool {
        self.find_line(text).is_some()
    }

    /// Whole screen, one row per line (handy in assertion messages)
    pub fn content(&self) -> String {
        (0..self.buffer().area.height)
            .map(|y| self.line(y) + "\n")
            .collect()
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// AppState from default settings, no file selected
pub fn create_test_state() -> AppState {
    AppState::with_settings(Settings::default())
}

pub fn create_test_state_with_file(file: &str) -> AppState {
    let mut settings = Settings::default();
    settings.tail.file = Some(file.to_string());
    AppState::with_settings(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_default_size() {
        let term = TestTerminal::new();
        assert_eq!(term.area(), Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT));
    }

    #[test]
    fn test_row_lookup() {
        let mut term = TestTerminal::with_size(20, 5);
        let area = term.area();
        term.render_widget(Paragraph::new("first\nHello World"), area);

        assert!(term.buffer_contains("Hello World"));
        assert!(!term.buffer_contains("Goodbye"));
        assert_eq!(term.find_line("Hello"), Some(1));
        assert!(term.line(9).is_empty());
        assert_eq!(term.content().lines().count(), 5);
    }

    #[test]
    fn test_create_test_state_with_file() {
        let state = create_test_state_with_file("logs/error.log");
        assert_eq!(state.file_label(), "logs/error.log");
    }
}
