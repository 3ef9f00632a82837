//! # Command Palette Component
//!
//! Search overlay opened with Ctrl+K. The result list is derived from the
//! query on every keystroke; an empty query shows a prompt instead of
//! results.
//!
//! - `CommandPaletteState` lives in `TuiState` while the palette is open
//! - `CommandPalette` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState, Paragraph};

use crate::core::data::filter_results;
use crate::core::types::SearchResult;
use crate::tui::component::EventHandler;
use crate::tui::components::overlay::{centered_rect, truncate_str};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

const PROMPT: &str = "Search conversations and messages...";
const EMPTY_QUERY_HINT: &str = "Type to search your conversations";
const NO_RESULTS: &str = "No results found";

#[derive(Debug, Clone, PartialEq)]
pub enum PaletteEvent {
    Navigate {
        conversation_id: String,
        message_id: String,
    },
    Dismiss,
}

pub struct CommandPaletteState {
    pub query: String,
    pub results: Vec<SearchResult>,
    corpus: Vec<SearchResult>,
    list_state: ListState,
}

impl CommandPaletteState {
    pub fn new(corpus: Vec<SearchResult>) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            corpus,
            list_state: ListState::default(),
        }
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        self.list_state.selected().and_then(|i| self.results.get(i))
    }

    fn refilter(&mut self) {
        self.results = filter_results(&self.corpus, &self.query);
        self.list_state
            .select((!self.results.is_empty()).then_some(0));
    }
}

impl EventHandler for CommandPaletteState {
    type Event = PaletteEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape | TuiEvent::OpenSearch => Some(PaletteEvent::Dismiss),
            TuiEvent::InputChar(c) if *c != '\n' => {
                self.query.push(*c);
                self.refilter();
                None
            }
            TuiEvent::Paste(text) => {
                self.query.push_str(&text.replace('\n', " "));
                self.refilter();
                None
            }
            TuiEvent::Backspace => {
                self.query.pop();
                self.refilter();
                None
            }
            TuiEvent::CursorUp | TuiEvent::BackTab => {
                self.list_state.select_previous();
                None
            }
            TuiEvent::CursorDown | TuiEvent::Tab => {
                if !self.results.is_empty() {
                    let last = self.results.len() - 1;
                    let next = self.list_state.selected().map_or(0, |i| (i + 1).min(last));
                    self.list_state.select(Some(next));
                }
                None
            }
            TuiEvent::Submit => self.selected().map(|result| PaletteEvent::Navigate {
                conversation_id: result.conversation_id.clone(),
                message_id: result.id.clone(),
            }),
            _ => None,
        }
    }
}

pub struct CommandPalette<'a> {
    state: &'a mut CommandPaletteState,
    palette: &'a Palette,
}

impl<'a> CommandPalette<'a> {
    pub fn new(state: &'a mut CommandPaletteState, palette: &'a Palette) -> Self {
        Self { state, palette }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.palette.accent())
            .title(" Search ")
            .title_bottom(Line::from(" ↑↓ select · Enter open · Esc close ").centered())
            .style(self.palette.base());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [query_area, rule_area, results_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let query_line = if self.state.query.is_empty() {
            Line::from(vec![
                Span::styled(" 🔍 ", self.palette.accent()),
                Span::styled(PROMPT, self.palette.muted().add_modifier(Modifier::ITALIC)),
            ])
        } else {
            Line::from(vec![
                Span::styled(" 🔍 ", self.palette.accent()),
                Span::raw(self.state.query.clone()),
            ])
        };
        frame.render_widget(Paragraph::new(query_line), query_area);
        frame.render_widget(
            Paragraph::new("─".repeat(rule_area.width as usize)).style(self.palette.border()),
            rule_area,
        );
        frame.set_cursor_position((
            query_area.x + 4 + unicode_width::UnicodeWidthStr::width(self.state.query.as_str()) as u16,
            query_area.y,
        ));

        if self.state.query.is_empty() || self.state.results.is_empty() {
            let hint = if self.state.query.is_empty() {
                EMPTY_QUERY_HINT
            } else {
                NO_RESULTS
            };
            frame.render_widget(
                Paragraph::new(hint).style(self.palette.muted()).centered(),
                results_area,
            );
            return;
        }

        let width = results_area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .state
            .results
            .iter()
            .map(|r| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            truncate_str(&r.title, width.saturating_sub(r.date.len() + 2)),
                            self.palette.base().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!("  {}", r.date), self.palette.muted()),
                    ]),
                    Line::from(Span::styled(truncate_str(&r.content, width), self.palette.muted())),
                    Line::from(""),
                ])
            })
            .collect();
        let list = List::new(items)
            .highlight_style(self.palette.selected())
            .highlight_symbol("▸ ");
        frame.render_stateful_widget(list, results_area, &mut self.state.list_state);
    }
}
