//! # MessageList Component
//!
//! Scrollable view of the conversation timeline.
//!
//! ## Responsibilities
//!
//! - Display the list of messages
//! - Manage scrolling and the message cursor
//! - Hit testing for mouse interactions
//! - Cache message heights between frames
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice (props).
//!
//! Since `Component::render` takes `&mut self`, we can safely mutate the state
//! (including layout cache and scroll state) during the render pass, aligning
//! with Ratatui's `StatefulWidget` pattern.

use std::collections::HashSet;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::types::{Message, Role};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageView;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Message under the cursor (hover or keyboard navigation)
    pub selected_index: Option<usize>,
    /// Assistant messages whose thinking trace is expanded
    pub expanded_indices: HashSet<usize>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            selected_index: None,
            expanded_indices: HashSet::new(),
            viewport_height: 0,
        }
    }

    /// Forget everything about the previous timeline.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Expand or collapse the thinking trace of message `idx`.
    pub fn toggle_thinking(&mut self, idx: usize) {
        if !self.expanded_indices.remove(&idx) {
            self.expanded_indices.insert(idx);
        }
    }

    /// Move the cursor one message up. Starts at the last message.
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(i) if i > 0 => i - 1,
            Some(_) => 0,
            None => len - 1,
        });
        self.scroll_to_selected();
    }

    /// Move the cursor one message down, stopping at the last one.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(i) => (i + 1).min(len - 1),
            None => len - 1,
        });
        self.scroll_to_selected();
    }

    /// Map a row relative to the top of the viewport to a message index.
    pub fn index_at(&self, row: u16) -> Option<usize> {
        let y = self.scroll_state.offset().y.saturating_add(row);
        let idx = self.layout.prefix_heights.partition_point(|&end| end <= y);
        (idx < self.layout.prefix_heights.len()).then_some(idx)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.layout.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected message is fully visible.
    /// If the message is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        if idx >= self.layout.prefix_heights.len() {
            return;
        }

        let item_top = if idx == 0 {
            0
        } else {
            self.layout.prefix_heights[idx - 1]
        };
        let item_bottom = self.layout.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
            self.stick_to_bottom = false;
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
            // Re-pin if we've landed at the absolute bottom
            let max_y = self.layout.total_height().saturating_sub(self.viewport_height);
            self.stick_to_bottom = new_y >= max_y;
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.layout.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub assistant_name: &'a str,
    pub palette: &'a Palette,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        assistant_name: &'a str,
        palette: &'a Palette,
    ) -> Self {
        Self {
            state,
            messages,
            assistant_name,
            palette,
        }
    }

    /// The toolbar is revealed on the assistant message under the cursor.
    fn toolbar_index(&self) -> Option<usize> {
        self.state
            .selected_index
            .filter(|&i| self.messages.get(i).is_some_and(|m| m.role == Role::Assistant))
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let num_items = self.messages.len();
        let toolbar_index = self.toolbar_index();

        // 1. Update layout cache
        let expanded_indices = &self.state.expanded_indices;
        let layout = &mut self.state.layout;
        let reusable =
            layout.reusable_count(num_items, content_width, expanded_indices, toolbar_index);
        layout.heights.truncate(reusable.min(layout.heights.len()));

        for (i, message) in self.messages.iter().enumerate().skip(layout.heights.len()) {
            layout.heights.push(MessageView::calculate_height(
                message,
                content_width,
                expanded_indices.contains(&i),
                toolbar_index == Some(i),
            ));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(num_items, content_width, expanded_indices, toolbar_index);

        let total_height = self.state.layout.total_height();

        // 2. Clamp scroll offset to prevent overscrolling past content
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            // Pin before picking visible rows so new content is drawn this frame
            self.state.scroll_state.set_offset(Position {
                x: 0,
                y: total_height.saturating_sub(area.height),
            });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let view = MessageView::new(
                &self.messages[i],
                self.assistant_name,
                self.state.expanded_indices.contains(&i),
                toolbar_index == Some(i),
                self.state.selected_index == Some(i),
                self.palette,
            );
            scroll_view.render_widget(view, Rect::new(0, y_offset, content_width, height));
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler is implemented on `MessageListState` rather than `MessageList`
/// because `MessageList` is recreated each frame with fresh props, while the
/// state lives in `TuiState` and persists across the event loop.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            // Cursor movement needs the message count; see select_prev/next
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
    cached_expanded_indices: HashSet<usize>,
    cached_toolbar_index: Option<usize>,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
            cached_expanded_indices: HashSet::new(),
            cached_toolbar_index: None,
        }
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Number of leading cached heights still valid for this frame.
    ///
    /// Messages never change once appended, so only a width change, a
    /// shrinking timeline, a thinking toggle or a moved toolbar invalidate.
    pub fn reusable_count(
        &self,
        message_count: usize,
        content_width: u16,
        expanded_indices: &HashSet<usize>,
        toolbar_index: Option<usize>,
    ) -> usize {
        if self.content_width != content_width || self.heights.is_empty() {
            return 0;
        }
        if message_count < self.message_count {
            return 0;
        }

        let mut reusable = message_count;
        if let Some(earliest) = expanded_indices
            .symmetric_difference(&self.cached_expanded_indices)
            .copied()
            .min()
        {
            reusable = reusable.min(earliest);
        }
        if toolbar_index != self.cached_toolbar_index {
            let earliest = toolbar_index
                .into_iter()
                .chain(self.cached_toolbar_index)
                .min()
                .unwrap_or(0);
            reusable = reusable.min(earliest);
        }
        reusable
    }

    pub fn update_metadata(
        &mut self,
        message_count: usize,
        content_width: u16,
        expanded_indices: &HashSet<usize>,
        toolbar_index: Option<usize>,
    ) {
        self.message_count = message_count;
        self.content_width = content_width;
        self.cached_expanded_indices = expanded_indices.clone();
        self.cached_toolbar_index = toolbar_index;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_layout_cache_reusable() {
        let mut cache = LayoutCache::new();
        let none = HashSet::new();
        cache.update_metadata(5, 80, &none, None);
        cache.heights = vec![1; 5];

        // Same everything -> all reusable
        assert_eq!(cache.reusable_count(5, 80, &none, None), 5);
        // New message appended -> earlier heights still valid
        assert_eq!(cache.reusable_count(6, 80, &none, None), 6);
        // Width changed -> nothing reusable
        assert_eq!(cache.reusable_count(5, 40, &none, None), 0);
        // Timeline shrank (new conversation) -> nothing reusable
        assert_eq!(cache.reusable_count(2, 80, &none, None), 0);
    }

    #[test]
    fn test_expansion_toggle_invalidates_cache() {
        let mut cache = LayoutCache::new();
        let none = HashSet::new();
        cache.heights = vec![3, 3, 3];
        cache.update_metadata(3, 80, &none, None);

        let expanded: HashSet<usize> = [1].into_iter().collect();
        assert_eq!(cache.reusable_count(3, 80, &expanded, None), 1);
    }

    #[test]
    fn test_toolbar_move_invalidates_from_earliest() {
        let mut cache = LayoutCache::new();
        let none = HashSet::new();
        cache.heights = vec![3, 3, 3, 3];
        cache.update_metadata(4, 80, &none, Some(3));

        assert_eq!(cache.reusable_count(4, 80, &none, Some(1)), 1);
        assert_eq!(cache.reusable_count(4, 80, &none, None), 3);
        assert_eq!(cache.reusable_count(4, 80, &none, Some(3)), 4);
    }

    #[test]
    fn test_index_at_maps_rows_to_messages() {
        let mut state = MessageListState::new();
        state.layout.heights = vec![4, 6];
        state.layout.rebuild_prefix_heights();
        assert_eq!(state.index_at(0), Some(0));
        assert_eq!(state.index_at(3), Some(0));
        assert_eq!(state.index_at(4), Some(1));
        assert_eq!(state.index_at(9), Some(1));
        assert_eq!(state.index_at(10), None);
    }

    #[test]
    fn test_cursor_starts_at_last_and_clamps() {
        let mut state = MessageListState::new();
        state.select_prev(3);
        assert_eq!(state.selected_index, Some(2));
        state.select_next(3);
        assert_eq!(state.selected_index, Some(2));
        state.select_prev(3);
        state.select_prev(3);
        state.select_prev(3);
        assert_eq!(state.selected_index, Some(0));
        state.select_next(0);
        assert_eq!(state.selected_index, Some(0));
    }

    #[test]
    fn test_toggle_thinking() {
        let mut state = MessageListState::new();
        state.toggle_thinking(1);
        assert!(state.expanded_indices.contains(&1));
        state.toggle_thinking(1);
        assert!(state.expanded_indices.is_empty());
    }

    #[test]
    fn test_render_sticks_to_bottom() {
        let messages: Vec<Message> = (0..20)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("question {i}"))
                } else {
                    Message::assistant(format!("answer {i}"))
                }
            })
            .collect();
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let palette = Palette::for_theme(Theme::Light);
        let mut state = MessageListState::new();
        terminal
            .draw(|f| MessageList::new(&mut state, &messages, "ORION", &palette).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("answer 19"));
        assert!(!text.contains("question 0 "));
        assert_eq!(state.layout.heights.len(), 20);
    }

    #[test]
    fn test_growth_between_frames_stays_pinned() {
        let messages: Vec<Message> = (0..20)
            .map(|i| Message::assistant(format!("answer {i}")))
            .collect();
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let palette = Palette::for_theme(Theme::Light);
        let mut state = MessageListState::new();
        terminal
            .draw(|f| MessageList::new(&mut state, &messages[..2], "ORION", &palette).render(f, f.area()))
            .unwrap();
        terminal
            .draw(|f| MessageList::new(&mut state, &messages, "ORION", &palette).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("answer 19"));
        assert_eq!(
            state.scroll_state.offset().y,
            state.layout.total_height() - 10
        );
    }
}
