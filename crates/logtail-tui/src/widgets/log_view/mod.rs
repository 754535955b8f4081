//! Scrollable log view widget with per-kind styling

use std::ops::Range;

use logtail_app::log_view_state::{FocusInfo, LogViewState};
use logtail_app::{InfoLine, TailView, ViewLine};
use logtail_core::{EntryKind, LogEntry, RequestAnchor, Severity};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::{palette, styles};

/// Columns a tab expands to
const TAB_WIDTH: usize = 4;

/// Width of the line number column, separator included
const LINE_NUMBER_WIDTH: usize = 7;

/// Rule drawn around informational lines
const INFO_RULE: &str = " ----------------- ";

/// Log view widget over a [`TailView`]
pub struct LogView<'a> {
    tail: &'a TailView,
    title: &'a str,
    show_line_numbers: bool,
    /// Second line of the empty-state message
    empty_hint: Option<&'a str>,
    focused: bool,
}

impl<'a> LogView<'a> {
    pub fn new(tail: &'a TailView) -> Self {
        Self {
            tail,
            title: " Logs ",
            show_line_numbers: false,
            empty_hint: None,
            focused: true,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn show_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    pub fn empty_hint(mut self, hint: &'a str) -> Self {
        self.empty_hint = Some(hint);
        self
    }

    /// Dim the border while a prompt has the keyboard
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Title with visible/total counts and the active filter
    fn build_title(&self) -> String {
        let base = self.title.trim();
        let mut parts = Vec::new();

        let total = self.tail.len();
        let visible = self.tail.visible_len();
        if visible != total {
            parts.push(format!("{}/{} lines", visible, total));
        }

        if let Some(pattern) = self.tail.filter_pattern() {
            parts.push(format!("/{}/", pattern));
        }

        if parts.is_empty() {
            format!(" {} ", base)
        } else {
            format!(" {} · {} ", base, parts.join(" · "))
        }
    }

    fn render_message(&self, lines: Vec<Line<'static>>, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused).title(self.build_title());
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Waiting for log data",
                styles::text_muted().add_modifier(Modifier::BOLD),
            )),
        ];
        if let Some(hint) = self.empty_hint {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                hint.to_string(),
                styles::text_muted(),
            )));
        }
        self.render_message(lines, area, buf);
    }

    fn render_all_hidden(&self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No lines match the current view",
                Style::default()
                    .fg(palette::STATUS_YELLOW)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press e or m to show all lines",
                styles::text_muted(),
            )),
        ];
        self.render_message(lines, area, buf);
    }

    fn format_line(&self, line: &ViewLine, seq: Option<u64>) -> Line<'static> {
        let mut spans = Vec::new();

        if self.show_line_numbers {
            let number = seq.map(|s| (s + 1).to_string()).unwrap_or_default();
            spans.push(Span::styled(
                format!("{:>width$} ", number, width = LINE_NUMBER_WIDTH - 1),
                styles::line_number(),
            ));
        }

        match line {
            ViewLine::Entry(entry) => {
                spans.push(Self::gutter(entry));
                spans.extend(Self::entry_spans(entry));
            }
            ViewLine::Info(info) => spans.extend(Self::info_spans(info)),
        }

        Line::from(spans)
    }

    /// Two-column marker left of the text
    fn gutter(entry: &LogEntry) -> Span<'static> {
        let severity = entry.severity.unwrap_or(Severity::Error);
        match entry.kind {
            EntryKind::ErrorStart => Span::styled("▌ ", styles::section_gutter(severity)),
            EntryKind::ErrorContinuation => Span::styled("│ ", styles::section_gutter(severity)),
            EntryKind::RequestStart => Span::styled("→ ", styles::accent()),
            EntryKind::RequestEnd => Span::styled("← ", styles::accent()),
            EntryKind::Plain => Span::raw("  "),
        }
    }

    fn base_style(entry: &LogEntry) -> Style {
        let severity = entry.severity.unwrap_or(Severity::Error);
        match entry.kind {
            EntryKind::ErrorStart => styles::section_text(severity, true),
            EntryKind::ErrorContinuation => styles::section_text(severity, false),
            EntryKind::RequestStart | EntryKind::RequestEnd | EntryKind::Plain => {
                styles::text_primary()
            }
        }
    }

    /// Split the entry text at every anchor and highlight boundary, styling
    /// each piece. Highlights are drawn over the anchor.
    fn entry_spans(entry: &LogEntry) -> Vec<Span<'static>> {
        let text = entry.text.as_str();
        let base = Self::base_style(entry);

        let mut bounds = vec![0, text.len()];
        let ranges = entry
            .highlights
            .iter()
            .chain(entry.anchor.as_ref().map(|a| &a.span));
        for range in ranges {
            bounds.push(range.start.min(text.len()));
            bounds.push(range.end.min(text.len()));
        }
        bounds.sort_unstable();
        bounds.dedup();

        bounds
            .windows(2)
            .filter_map(|pair| {
                let piece = pair[0]..pair[1];
                let content = text.get(piece.clone())?;
                let style = Self::piece_style(base, &piece, entry.anchor.as_ref(), &entry.highlights);
                Some(Span::styled(display_text(content), style))
            })
            .filter(|span| !span.content.is_empty())
            .collect()
    }

    fn piece_style(
        base: Style,
        piece: &Range<usize>,
        anchor: Option<&RequestAnchor>,
        highlights: &[Range<usize>],
    ) -> Style {
        let covers = |range: &Range<usize>| range.start <= piece.start && piece.end <= range.end;

        let mut style = base;
        if let Some(anchor) = anchor.filter(|a| covers(&a.span)) {
            style = style.patch(styles::request_anchor(anchor.role));
        }
        if highlights.iter().any(covers) {
            style = style.patch(styles::match_highlight());
        }
        style
    }

    fn info_spans(info: &InfoLine) -> Vec<Span<'static>> {
        vec![
            Span::styled(
                format!("{} ", info.received_at.format("%H:%M:%S")),
                styles::text_muted(),
            ),
            Span::styled(
                format!("{}{}{}", INFO_RULE.trim_start(), display_text(&info.text), INFO_RULE),
                styles::info_line(),
            ),
        ]
    }

    /// Calculate the display width of a Line (sum of span content widths)
    fn line_width(line: &Line) -> usize {
        line.spans.iter().map(|s| s.content.width()).sum()
    }

    /// Apply horizontal scroll offset to a line, truncating and adding indicators.
    ///
    /// Offsets are terminal columns; a wide character straddling either edge
    /// is dropped.
    fn apply_horizontal_scroll(
        line: Line<'static>,
        h_offset: usize,
        visible_width: usize,
    ) -> Line<'static> {
        let line_width = Self::line_width(&line);

        if h_offset == 0 && line_width <= visible_width {
            return line;
        }
        if h_offset >= line_width {
            return Line::from("");
        }

        let has_more_left = h_offset > 0;
        let has_more_right = line_width > h_offset + visible_width;

        // Reserve a column for each indicator
        let start = h_offset + usize::from(has_more_left);
        let end = (h_offset + visible_width)
            .saturating_sub(usize::from(has_more_right))
            .min(line_width);

        let mut spans: Vec<Span<'static>> = Vec::new();
        if has_more_left {
            spans.push(Span::styled("←", styles::text_muted()));
        }

        let mut column = 0;
        for span in &line.spans {
            let mut text = String::new();
            for c in span.content.chars() {
                let width = c.width().unwrap_or(0);
                if column >= start && column + width <= end {
                    text.push(c);
                }
                column += width;
            }
            if !text.is_empty() {
                spans.push(Span::styled(text, span.style));
            }
        }

        if has_more_right {
            spans.push(Span::styled("→", styles::text_muted()));
        }

        Line::from(spans)
    }
}

/// Expand tabs and drop other control characters, which have no width
fn display_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.extend(std::iter::repeat(' ').take(TAB_WIDTH)),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

impl<'a> StatefulWidget for LogView<'a> {
    type State = LogViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let rows = area.height.saturating_sub(2) as usize;

        if self.tail.is_empty() {
            state.update_content_size(0, rows);
            state.focus_info = FocusInfo::default();
            self.render_empty(area, buf);
            return;
        }

        let total_lines = self.tail.visible_len();
        if total_lines == 0 {
            state.update_content_size(0, rows);
            state.focus_info = FocusInfo::default();
            self.render_all_hidden(area, buf);
            return;
        }

        let block = styles::glass_block(self.focused).title(self.build_title());
        let inner = block.inner(area);
        block.render(area, buf);

        let visible_lines = inner.height as usize;
        state.update_content_size(total_lines, visible_lines);

        let start = state.offset;
        let end = (start + visible_lines).min(total_lines);

        let all_lines: Vec<Line<'static>> = self
            .tail
            .visible_slice(start, end)
            .enumerate()
            .map(|(i, line)| self.format_line(line, self.tail.seq_of_visible(start + i)))
            .collect();

        // Focus is the top line of the viewport
        state.focus_info = if start < end {
            FocusInfo {
                visible_index: Some(start),
                seq: self.tail.seq_of_visible(start),
            }
        } else {
            FocusInfo::default()
        };

        let max_line_width = all_lines
            .iter()
            .map(|l| Self::line_width(l))
            .max()
            .unwrap_or(0);
        let visible_width = inner.width as usize;
        state.update_horizontal_size(max_line_width, visible_width);

        let scrolled_lines: Vec<Line> = all_lines
            .into_iter()
            .map(|line| Self::apply_horizontal_scroll(line, state.h_offset, visible_width))
            .collect();

        // Lines are truncated/scrolled, never wrapped
        Paragraph::new(scrolled_lines).render(inner, buf);

        if total_lines > visible_lines {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"))
                .track_symbol(Some("│"))
                .thumb_symbol("█");

            let mut scrollbar_state = ScrollbarState::new(total_lines).position(state.offset);

            scrollbar.render(area, buf, &mut scrollbar_state);
        }
    }
}

// Non-stateful version for simple rendering
impl Widget for LogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut state = LogViewState::new();
        StatefulWidget::render(self, area, buf, &mut state);
    }
}
