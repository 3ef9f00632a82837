//! Small pop-up list used by the input's attach and tool menus.
//!
//! The menu is anchored above the input box. The parent owns a
//! `PickMenuState` while the menu is open and drops it on close.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState};

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

#[derive(Debug, Clone, PartialEq)]
pub enum PickMenuEvent<T> {
    Picked(T),
    Closed,
}

pub struct PickMenuState<T> {
    pub title: &'static str,
    pub items: Vec<(T, &'static str)>,
    pub list_state: ListState,
}

impl<T: Copy> PickMenuState<T> {
    pub fn new(title: &'static str, items: Vec<(T, &'static str)>) -> Self {
        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            title,
            items,
            list_state,
        }
    }

    pub fn selected(&self) -> Option<T> {
        self.list_state
            .selected()
            .and_then(|i| self.items.get(i))
            .map(|(item, _)| *item)
    }

    /// Rows needed including borders.
    pub fn height(&self) -> u16 {
        self.items.len() as u16 + 2
    }

    pub fn width(&self) -> u16 {
        let widest = self
            .items
            .iter()
            .map(|(_, label)| unicode_width::UnicodeWidthStr::width(*label))
            .chain(std::iter::once(self.title.len() + 2))
            .max()
            .unwrap_or(0);
        widest as u16 + 6
    }

    /// Area of the menu when anchored to the top-left corner of `anchor`.
    pub fn area_above(&self, anchor: Rect, screen: Rect) -> Rect {
        let height = self.height().min(anchor.y.saturating_sub(screen.y));
        Rect {
            x: anchor.x + 1,
            y: anchor.y.saturating_sub(height),
            width: self.width().min(anchor.width.saturating_sub(1)),
            height,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        frame.render_widget(Clear, area);
        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|(_, label)| ListItem::new(format!(" {label}")))
            .collect();
        let list = List::new(items)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(palette.border())
                    .title(format!(" {} ", self.title)),
            )
            .style(palette.base())
            .highlight_style(palette.selected())
            .highlight_symbol("▸");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl<T: Copy> EventHandler for PickMenuState<T> {
    type Event = PickMenuEvent<T>;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(PickMenuEvent::Closed),
            TuiEvent::CursorUp | TuiEvent::BackTab => {
                self.list_state.select_previous();
                None
            }
            TuiEvent::CursorDown | TuiEvent::Tab => {
                let last = self.items.len().saturating_sub(1);
                let next = self.list_state.selected().map_or(0, |i| (i + 1).min(last));
                self.list_state.select(Some(next));
                None
            }
            TuiEvent::Submit => self.selected().map(PickMenuEvent::Picked),
            // Digits pick directly
            TuiEvent::InputChar(c) => c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .and_then(|i| self.items.get(i))
                .map(|(item, _)| PickMenuEvent::Picked(*item)),
            _ => None,
        }
    }
}
