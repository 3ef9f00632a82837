//! # Sidebar Component
//!
//! Panel docked on the left listing past conversations. Opened with Ctrl+B,
//! dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState` and only tracks the cursor
//! - `Sidebar` is created each frame with the conversation list as a prop

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::types::{ConversationAction, ConversationSummary};
use crate::tui::components::overlay::truncate_str;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

pub const SIDEBAR_WIDTH: u16 = 34;

/// Persistent state for the sidebar.
#[derive(Default)]
pub struct SidebarState {
    pub selected: usize,
    pub confirm_delete: bool,
    pub list_state: ListState,
}

/// Events emitted by the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarEvent {
    Select(String),
    CreateNew,
    Act(String, ConversationAction),
    Dismiss,
}

impl SidebarState {
    /// Reset the cursor to the active conversation when the panel opens.
    pub fn open(&mut self, conversations: &[ConversationSummary], active: Option<&str>) {
        self.selected = active
            .and_then(|id| conversations.iter().position(|c| c.id == id))
            .unwrap_or(0);
        self.confirm_delete = false;
        self.list_state
            .select((!conversations.is_empty()).then_some(self.selected));
    }

    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        conversations: &[ConversationSummary],
    ) -> Option<SidebarEvent> {
        // Any other key cancels a pending delete
        if !matches!(event, TuiEvent::InputChar('d')) {
            self.confirm_delete = false;
        }
        let current = conversations.get(self.selected).map(|c| c.id.clone());

        match event {
            TuiEvent::Escape | TuiEvent::ToggleSidebar => Some(SidebarEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                if !conversations.is_empty() {
                    self.selected = (self.selected + 1).min(conversations.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => current.map(SidebarEvent::Select),
            TuiEvent::InputChar('n') | TuiEvent::NewConversation => Some(SidebarEvent::CreateNew),
            TuiEvent::InputChar('p') => current.map(|id| SidebarEvent::Act(id, ConversationAction::Pin)),
            TuiEvent::InputChar('r') => {
                current.map(|id| SidebarEvent::Act(id, ConversationAction::Rename))
            }
            TuiEvent::InputChar('a') => {
                current.map(|id| SidebarEvent::Act(id, ConversationAction::Archive))
            }
            TuiEvent::InputChar('d') => {
                let id = current?;
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(SidebarEvent::Act(id, ConversationAction::Delete))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    state: &'a mut SidebarState,
    conversations: &'a [ConversationSummary],
    active: Option<&'a str>,
    palette: &'a Palette,
}

impl<'a> Sidebar<'a> {
    pub fn new(
        state: &'a mut SidebarState,
        conversations: &'a [ConversationSummary],
        active: Option<&'a str>,
        palette: &'a Palette,
    ) -> Self {
        Self {
            state,
            conversations,
            active,
            palette,
        }
    }

    /// Area occupied by the panel inside `screen`.
    pub fn area(screen: Rect) -> Rect {
        let [panel, _] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(screen);
        panel
    }

    pub fn render(&mut self, frame: &mut Frame, screen: Rect) {
        let panel = Self::area(screen);
        frame.render_widget(Clear, panel);

        let help = if self.state.confirm_delete {
            " d again to delete · Esc cancel "
        } else {
            " n new · p pin · r rename · a archive · d delete "
        };
        let block = Block::default()
            .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
            .border_style(self.palette.border())
            .title(Span::styled(
                " Conversations ",
                self.palette.base().add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(Span::styled(
                truncate_str(help, panel.width.saturating_sub(2) as usize),
                self.palette.muted(),
            )))
            .padding(Padding::horizontal(1))
            .style(self.palette.base());

        if self.conversations.is_empty() {
            frame.render_widget(
                Paragraph::new("No conversations yet.")
                    .style(self.palette.muted())
                    .block(block),
                panel,
            );
            return;
        }

        let inner_width = panel.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .conversations
            .iter()
            .enumerate()
            .map(|(i, conv)| {
                let is_active = self.active == Some(conv.id.as_str());
                let marker = if is_active { "● " } else { "  " };
                let mut title_style = self.palette.base();
                if is_active {
                    title_style = title_style.fg(self.palette.accent).add_modifier(Modifier::BOLD);
                }
                if i == self.state.selected && self.state.confirm_delete {
                    title_style = self.palette.toast(crate::core::toast::ToastKind::Error);
                }
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, self.palette.accent()),
                        Span::styled(truncate_str(&conv.title, inner_width.saturating_sub(2)), title_style),
                    ]),
                    Line::from(Span::styled(format!("  {}", conv.date), self.palette.muted())),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(self.palette.selected());
        frame.render_stateful_widget(list, panel, &mut self.state.list_state);
    }
}
