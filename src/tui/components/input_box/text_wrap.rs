//! Wrapping helpers and dimensions shared by the input box and its cursor.

/// Borders (2) + horizontal padding (2)
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Borders (2) + the controls row under the text
pub(super) const VERTICAL_OVERHEAD: u16 = 3;
/// Text rows shown before the box scrolls internally
pub(super) const MAX_VISIBLE_LINES: u16 = 6;
/// Left border + padding before the first text column
pub(super) const TEXT_OFFSET_X: u16 = 2;
/// Top border
pub(super) const TEXT_OFFSET_Y: u16 = 1;

pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Text columns available inside a box `outer_width` wide.
pub(super) fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Rows the text occupies once wrapped. Never less than one.
///
/// textwrap drops the empty row after a trailing newline, so it is counted
/// here explicitly.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }
    let lines = textwrap::wrap(text, wrap_options(width));
    let mut count = (lines.len() as u16).max(1);
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        count += 1;
    }
    count
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}
