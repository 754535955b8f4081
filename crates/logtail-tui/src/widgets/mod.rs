//! Custom widget components

mod header;
mod log_view;
mod prompt_input;
mod status_bar;

pub use header::Header;
pub use log_view::LogView;
pub use prompt_input::PromptInput;
pub use status_bar::StatusBar;

// Re-export state types from app layer (these are used by render/)
pub use logtail_app::log_view_state::LogViewState;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `max` terminal columns, marking the cut with `…`
pub(crate) fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let width = c.width().unwrap_or(0);
        if used + width > max - 1 {
            break;
        }
        out.push(c);
        used += width;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_marks_cut() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn test_truncate_counts_wide_chars_as_two_columns() {
        // Each CJK char takes two columns
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }
}
