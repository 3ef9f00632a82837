//! Cursor position and internal scrolling of the input box.
//!
//! The text itself lives in `InputBox::buffer`; every method takes it as a
//! parameter.

use ratatui::layout::Rect;

use super::text_wrap::{
    MAX_VISIBLE_LINES, TEXT_OFFSET_X, TEXT_OFFSET_Y, inner_width, wrap_line_count, wrap_options,
};

pub(super) struct CursorState {
    /// Byte offset into the buffer, always on a char boundary
    pub pos: usize,
    /// First visible wrapped row
    pub scroll_offset: u16,
    /// Box width seen by the last render, used for vertical movement
    pub last_width: u16,
}

/// Start offset and byte span (including a consumed newline) of each wrapped row.
fn row_spans(buffer: &str, width: u16) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for row in textwrap::wrap(buffer, wrap_options(width)) {
        let mut end = start + row.len();
        let mut span = row.len();
        // Skip whitespace textwrap folded away at the wrap point
        while end < buffer.len() && buffer.as_bytes()[end] == b' ' {
            end += 1;
            span += 1;
        }
        if end < buffer.len() && buffer.as_bytes()[end] == b'\n' {
            span += 1;
        }
        spans.push((start, row.len()));
        start += span;
    }
    spans
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_width: 80,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Move one wrapped row up (`-1`) or down (`1`), keeping the column where
    /// possible. Returns false at the first or last row.
    pub fn move_vertically(&mut self, buffer: &str, direction: i8) -> bool {
        let width = inner_width(self.last_width);
        if width == 0 || buffer.is_empty() {
            return false;
        }
        let spans = row_spans(buffer, width);
        let Some(current) = spans
            .iter()
            .position(|&(start, len)| self.pos >= start && self.pos <= start + len)
        else {
            return false;
        };
        let target = match direction {
            d if d < 0 && current > 0 => current - 1,
            d if d > 0 && current + 1 < spans.len() => current + 1,
            _ => return false,
        };
        let column = self.pos - spans[current].0;
        let (start, len) = spans[target];
        let mut pos = start + column.min(len);
        while !buffer.is_char_boundary(pos) {
            pos -= 1;
        }
        self.pos = pos;
        true
    }

    /// Wrapped row (0-based) holding the cursor.
    pub fn row(&self, buffer: &str, width: u16) -> u16 {
        let width = inner_width(width);
        if width == 0 {
            return 0;
        }
        wrap_line_count(&buffer[..self.pos], width).saturating_sub(1)
    }

    /// Keep the cursor row inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, width: u16) {
        if wrap_line_count(buffer, inner_width(width)) <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }
        let row = self.row(buffer, width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Terminal (column, row) of the cursor inside the box at `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let origin = (area.x + TEXT_OFFSET_X, area.y + TEXT_OFFSET_Y);
        let width = inner_width(area.width);
        if width == 0 {
            return origin;
        }

        let before = &buffer[..self.pos];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let logical = &before[line_start..];

        // textwrap trims trailing spaces, so count columns from the logical
        // line instead of the wrapped rows.
        let segments = textwrap::wrap(logical, wrap_options(width));
        let consumed: usize = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .map(|s| s.chars().count())
            .sum();
        let column = logical.chars().count().saturating_sub(consumed) as u16;

        let row = self.row(buffer, area.width).saturating_sub(self.scroll_offset);
        (origin.0 + column.min(width), origin.1 + row)
    }
}
