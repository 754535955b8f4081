//! Semantic style builders.

use logtail_app::{ConnectionState, StatusLevel};
use logtail_core::{AnchorRole, Severity};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// "Black on Cyan" - active mode badges in the status bar
pub fn badge_active() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Log line styles ---

/// Gutter marker of an error/warning section line
pub fn section_gutter(severity: Severity) -> Style {
    let color = match severity {
        Severity::Error => palette::SECTION_ERROR,
        Severity::Warning => palette::SECTION_WARNING,
    };
    Style::default().fg(color)
}

/// Text of an error/warning section line; the opening line is bold
pub fn section_text(severity: Severity, start: bool) -> Style {
    let color = match severity {
        Severity::Error => palette::SECTION_ERROR_MSG,
        Severity::Warning => palette::SECTION_WARNING_MSG,
    };
    let style = Style::default().fg(color);
    if start {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// `[id]` anchor of a request line
pub fn request_anchor(role: AnchorRole) -> Style {
    match role {
        AnchorRole::Link => Style::default()
            .fg(palette::REQUEST_LINK)
            .add_modifier(Modifier::UNDERLINED),
        AnchorRole::Target => Style::default()
            .fg(palette::REQUEST_TARGET)
            .add_modifier(Modifier::BOLD),
    }
}

/// Filter match inside a line
pub fn match_highlight() -> Style {
    Style::default()
        .fg(palette::MATCH_HIGHLIGHT_FG)
        .bg(palette::MATCH_HIGHLIGHT_BG)
}

pub fn info_line() -> Style {
    Style::default()
        .fg(palette::INFO_LINE)
        .add_modifier(Modifier::ITALIC)
}

pub fn line_number() -> Style {
    Style::default().fg(palette::LINE_NUMBER)
}

pub fn status_level(level: StatusLevel) -> Style {
    match level {
        StatusLevel::Info => text_secondary(),
        StatusLevel::Warning => Style::default().fg(palette::STATUS_YELLOW),
        StatusLevel::Error => Style::default()
            .fg(palette::STATUS_RED)
            .add_modifier(Modifier::BOLD),
    }
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

// --- Connection indicator mapping ---

/// Connection indicator for the header.
///
/// Returns `(icon_char, label, Style)` for the given ConnectionState.
pub fn connection_indicator(state: &ConnectionState) -> (&'static str, String, Style) {
    match state {
        ConnectionState::Connected => (
            "●",
            "Connected".to_string(),
            Style::default()
                .fg(palette::STATUS_GREEN)
                .add_modifier(Modifier::BOLD),
        ),
        ConnectionState::Connecting => (
            "○",
            "Connecting".to_string(),
            Style::default().fg(palette::TEXT_MUTED),
        ),
        ConnectionState::Reconnecting { attempt } => (
            "↻",
            format!("Reconnecting (attempt {})", attempt),
            Style::default()
                .fg(palette::STATUS_YELLOW)
                .add_modifier(Modifier::BOLD),
        ),
        ConnectionState::Disconnected => (
            "✗",
            "Disconnected".to_string(),
            Style::default().fg(palette::STATUS_RED),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_styles_have_correct_colors() {
        assert_eq!(text_primary().fg, Some(palette::TEXT_PRIMARY));
        assert_eq!(text_secondary().fg, Some(palette::TEXT_SECONDARY));
        assert_eq!(text_muted().fg, Some(palette::TEXT_MUTED));
    }

    #[test]
    fn test_border_styles_have_correct_colors() {
        assert_eq!(border_inactive().fg, Some(palette::BORDER_DIM));
        assert_eq!(border_active().fg, Some(palette::BORDER_ACTIVE));
    }

    #[test]
    fn test_section_styles_follow_severity() {
        assert_eq!(
            section_gutter(Severity::Error).fg,
            Some(palette::SECTION_ERROR)
        );
        assert_eq!(
            section_gutter(Severity::Warning).fg,
            Some(palette::SECTION_WARNING)
        );
        assert!(section_text(Severity::Error, true)
            .add_modifier
            .contains(Modifier::BOLD));
        assert!(!section_text(Severity::Error, false)
            .add_modifier
            .contains(Modifier::BOLD));
    }

    #[test]
    fn test_request_link_is_underlined() {
        assert!(request_anchor(AnchorRole::Link)
            .add_modifier
            .contains(Modifier::UNDERLINED));
        assert!(!request_anchor(AnchorRole::Target)
            .add_modifier
            .contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_match_highlight_colors() {
        let style = match_highlight();
        assert_eq!(style.fg, Some(palette::MATCH_HIGHLIGHT_FG));
        assert_eq!(style.bg, Some(palette::MATCH_HIGHLIGHT_BG));
    }

    #[test]
    fn test_connection_indicator_labels() {
        let (_, label, _) = connection_indicator(&ConnectionState::Connected);
        assert_eq!(label, "Connected");

        let (icon, label, style) =
            connection_indicator(&ConnectionState::Reconnecting { attempt: 3 });
        assert_eq!(icon, "↻");
        assert_eq!(label, "Reconnecting (attempt 3)");
        assert_eq!(style.fg, Some(palette::STATUS_YELLOW));
    }

    #[test]
    fn test_glass_block_focused_uses_active_border() {
        let area = ratatui::layout::Rect::new(0, 0, 10, 3);
        let mut buf = ratatui::buffer::Buffer::empty(area);
        ratatui::widgets::Widget::render(glass_block(true), area, &mut buf);
        assert_eq!(buf[(0, 0)].fg, palette::BORDER_ACTIVE);
    }
}
