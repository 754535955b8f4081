//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Header height: top border + title row + bottom border
const HEADER_HEIGHT: u16 = 3;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Server, file and connection state
    pub header: Rect,

    /// Log view (glass container)
    pub logs: Rect,

    /// Single row for the status bar, or the prompt while one is open
    pub status: Rect,
}

/// Split the screen into header, logs and status row
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        logs: chunks[1],
        status: chunks[2],
    }
}
