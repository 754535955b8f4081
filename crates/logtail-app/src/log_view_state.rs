//! Log view state - scroll position, viewport bounds, and focus tracking.
//!
//! Shared by the handler layer (scroll commands, jumps) and the TUI (render).
//! One visible view line is one row; long lines scroll horizontally.

// ─────────────────────────────────────────────────────────────────────────────
// FocusInfo
// ─────────────────────────────────────────────────────────────────────────────

/// The line at the focus position (top of the visible area).
///
/// Updated during render.
#[derive(Debug, Default, Clone)]
pub struct FocusInfo {
    /// Index into the visible lines
    pub visible_index: Option<usize>,
    /// Sequence number of the focused line, stable across visibility changes
    pub seq: Option<u64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// LogViewState
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct LogViewState {
    /// Current vertical scroll offset from top
    pub offset: usize,
    /// Current horizontal scroll offset from left
    pub h_offset: usize,
    /// Stick to the newest line as content arrives
    pub auto_scroll: bool,
    /// Total number of visible view lines (set during render)
    pub total_lines: usize,
    /// Rows available for lines (set during render)
    pub visible_lines: usize,
    /// Maximum line width in current view (for h-scroll bounds)
    pub max_line_width: usize,
    /// Visible width (set during render)
    pub visible_width: usize,
    pub focus_info: FocusInfo,
}

impl Default for LogViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl LogViewState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            h_offset: 0,
            auto_scroll: true,
            total_lines: 0,
            visible_lines: 0,
            max_line_width: 0,
            visible_width: 0,
            focus_info: FocusInfo::default(),
        }
    }

    fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_lines)
    }

    /// Scroll up by n lines
    pub fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
        self.auto_scroll = false;
    }

    /// Scroll down by n lines
    pub fn scroll_down(&mut self, n: usize) {
        let max_offset = self.max_offset();
        self.offset = (self.offset + n).min(max_offset);

        // Re-enable auto-scroll if at bottom
        if self.offset >= max_offset {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_scroll = false;
    }

    /// Scroll to bottom and enable auto-scroll
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_scroll = true;
    }

    pub fn page_up(&mut self) {
        let page = self.visible_lines.saturating_sub(2).max(1);
        self.scroll_up(page);
    }

    pub fn page_down(&mut self) {
        let page = self.visible_lines.saturating_sub(2).max(1);
        self.scroll_down(page);
    }

    /// Put `index` at the top of the viewport (as far as the content allows)
    /// and stop following.
    pub fn jump_to(&mut self, index: usize) {
        self.offset = index.min(self.max_offset());
        self.auto_scroll = false;
    }

    /// Compensate for `n` visible lines removed above the viewport
    pub fn shift_up(&mut self, n: usize) {
        if !self.auto_scroll {
            self.offset = self.offset.saturating_sub(n);
        }
    }

    /// Update with new content size
    pub fn update_content_size(&mut self, total: usize, visible: usize) {
        self.total_lines = total;
        self.visible_lines = visible;

        if self.auto_scroll {
            self.offset = self.max_offset();
        } else if self.offset > self.max_offset() {
            self.offset = self.max_offset();
        }
    }

    /// Forget position and content; keeps the follow choice
    pub fn reset(&mut self) {
        self.offset = 0;
        self.h_offset = 0;
        self.total_lines = 0;
        self.max_line_width = 0;
        self.focus_info = FocusInfo::default();
    }

    pub fn scroll_left(&mut self, n: usize) {
        self.h_offset = self.h_offset.saturating_sub(n);
    }

    pub fn scroll_right(&mut self, n: usize) {
        let max_h_offset = self.max_line_width.saturating_sub(self.visible_width);
        self.h_offset = (self.h_offset + n).min(max_h_offset);
    }

    /// Update horizontal content dimensions
    pub fn update_horizontal_size(&mut self, max_width: usize, visible_width: usize) {
        self.max_line_width = max_width;
        self.visible_width = visible_width;

        // Clamp h_offset if content shrank
        let max_h_offset = max_width.saturating_sub(visible_width);
        if self.h_offset > max_h_offset {
            self.h_offset = max_h_offset;
        }
    }
}
