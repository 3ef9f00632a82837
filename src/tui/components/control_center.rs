//! # Control Center Component
//!
//! Tabbed settings overlay opened with Ctrl+G. The left column lists the
//! sections; the right column shows the active section's title, description
//! and content.
//!
//! Only the profile and settings sections hold form fields. Their values live
//! in memory for the session and are never written back to the config file.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::core::config::{CommunicationStyle, Profile};
use crate::core::theme::Theme;
use crate::tui::component::EventHandler;
use crate::tui::components::overlay::centered_rect;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

const NAV_WIDTH: u16 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Profile,
    AgentStudio,
    ModelFoundry,
    Memory,
    Security,
    Settings,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Profile,
        Section::AgentStudio,
        Section::ModelFoundry,
        Section::Memory,
        Section::Security,
        Section::Settings,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Profile => "profile",
            Section::AgentStudio => "agent-studio",
            Section::ModelFoundry => "model-foundry",
            Section::Memory => "memory",
            Section::Security => "security",
            Section::Settings => "settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Profile => "Profile",
            Section::AgentStudio => "Agent Studio",
            Section::ModelFoundry => "Model Foundry",
            Section::Memory => "Memory",
            Section::Security => "Security",
            Section::Settings => "Settings",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Section::Profile => "👤",
            Section::AgentStudio => "🤖",
            Section::ModelFoundry => "⚙",
            Section::Memory => "🧠",
            Section::Security => "🛡",
            Section::Settings => "🔧",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Section::Profile => "Configure your personal preferences and profile.",
            Section::AgentStudio => "Create and configure your specialized agents.",
            Section::ModelFoundry => "Select and configure the AI models.",
            Section::Memory => "Manage the knowledge base and vector memory.",
            Section::Security => "Configure security and privacy settings.",
            Section::Settings => "General application settings.",
        }
    }

    /// Placeholder body for sections without form fields.
    fn coming_soon(self) -> Option<&'static str> {
        match self {
            Section::ModelFoundry => Some("Model configuration coming soon..."),
            Section::Memory => Some("Memory management coming soon..."),
            Section::Security => Some("Security settings coming soon..."),
            _ => None,
        }
    }
}

const AGENT_CARDS: [(&str, &str); 3] = [
    ("Logic agent", "Specialized in technical analysis and structured reasoning"),
    ("Creative agent", "Generates innovative ideas and creative solutions"),
    ("Verifier agent", "Validates facts and keeps information consistent"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Nav,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileField {
    DisplayName,
    Style,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    ProfileChanged(Profile),
    ThemeChosen(Theme),
    Dismiss,
}

pub struct ControlCenterState {
    pub section: Section,
    pub focus: Focus,
    field: ProfileField,
    pub profile: Profile,
    pub theme: Theme,
    nav_state: ListState,
}

impl ControlCenterState {
    /// Open on the profile section with the current in-memory values.
    pub fn new(profile: Profile, theme: Theme) -> Self {
        Self {
            section: Section::Profile,
            focus: Focus::Nav,
            field: ProfileField::DisplayName,
            profile,
            theme,
            nav_state: ListState::default().with_selected(Some(0)),
        }
    }

    fn section_index(&self) -> usize {
        Section::ALL
            .iter()
            .position(|s| *s == self.section)
            .unwrap_or(0)
    }

    fn select_section(&mut self, idx: usize) {
        self.section = Section::ALL[idx.min(Section::ALL.len() - 1)];
        self.nav_state.select(Some(self.section_index()));
        self.field = ProfileField::DisplayName;
    }

    fn has_fields(&self) -> bool {
        matches!(self.section, Section::Profile | Section::Settings)
    }

    fn handle_nav(&mut self, event: &TuiEvent) -> Option<ControlEvent> {
        match event {
            TuiEvent::CursorUp => self.select_section(self.section_index().saturating_sub(1)),
            TuiEvent::CursorDown => self.select_section(self.section_index() + 1),
            TuiEvent::Submit | TuiEvent::Tab | TuiEvent::CursorRight if self.has_fields() => {
                self.focus = Focus::Content;
            }
            _ => {}
        }
        None
    }

    fn handle_profile(&mut self, event: &TuiEvent) -> Option<ControlEvent> {
        match (self.field, event) {
            (_, TuiEvent::CursorUp) => self.field = ProfileField::DisplayName,
            (_, TuiEvent::CursorDown) => self.field = ProfileField::Style,
            (ProfileField::DisplayName, TuiEvent::InputChar(c)) if !c.is_control() => {
                self.profile.display_name.push(*c);
                return Some(ControlEvent::ProfileChanged(self.profile.clone()));
            }
            (ProfileField::DisplayName, TuiEvent::Backspace) => {
                self.profile.display_name.pop()?;
                return Some(ControlEvent::ProfileChanged(self.profile.clone()));
            }
            (
                ProfileField::Style,
                TuiEvent::InputChar(' ') | TuiEvent::CursorRight | TuiEvent::Submit,
            ) => {
                self.profile.communication_style = self.profile.communication_style.next();
                return Some(ControlEvent::ProfileChanged(self.profile.clone()));
            }
            (ProfileField::Style, TuiEvent::CursorLeft) => {
                // Two steps forward is one step back in a ring of three
                let style = self.profile.communication_style.next().next();
                self.profile.communication_style = style;
                return Some(ControlEvent::ProfileChanged(self.profile.clone()));
            }
            _ => {}
        }
        None
    }

    fn handle_settings(&mut self, event: &TuiEvent) -> Option<ControlEvent> {
        match event {
            TuiEvent::InputChar(' ')
            | TuiEvent::CursorLeft
            | TuiEvent::CursorRight
            | TuiEvent::Submit => {
                self.theme = self.theme.toggle();
                Some(ControlEvent::ThemeChosen(self.theme))
            }
            _ => None,
        }
    }
}

impl EventHandler for ControlCenterState {
    type Event = ControlEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match (self.focus, event) {
            (_, TuiEvent::OpenSettings) | (Focus::Nav, TuiEvent::Escape) => {
                Some(ControlEvent::Dismiss)
            }
            (Focus::Content, TuiEvent::Escape | TuiEvent::Tab | TuiEvent::BackTab) => {
                self.focus = Focus::Nav;
                None
            }
            (Focus::Nav, _) => self.handle_nav(event),
            (Focus::Content, _) => match self.section {
                Section::Profile => self.handle_profile(event),
                Section::Settings => self.handle_settings(event),
                _ => None,
            },
        }
    }
}

pub struct ControlCenter<'a> {
    state: &'a mut ControlCenterState,
    palette: &'a Palette,
}

impl<'a> ControlCenter<'a> {
    pub fn new(state: &'a mut ControlCenterState, palette: &'a Palette) -> Self {
        Self { state, palette }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 80, area);
        frame.render_widget(Clear, overlay);

        let help = match self.state.focus {
            Focus::Nav => " ↑↓ section · Enter edit · Esc close ",
            Focus::Content => " ↑↓ field · Space change · Esc back ",
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.palette.border())
            .title(Span::styled(
                " Control Center ",
                self.palette.base().add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(Span::styled(help, self.palette.muted())).centered())
            .style(self.palette.base());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [nav_area, content_area] =
            Layout::horizontal([Constraint::Length(NAV_WIDTH), Constraint::Min(0)]).areas(inner);

        let nav_items: Vec<ListItem> = Section::ALL
            .iter()
            .map(|s| ListItem::new(format!(" {} {}", s.icon(), s.label())))
            .collect();
        let nav_highlight = if self.state.focus == Focus::Nav {
            self.palette.selected()
        } else {
            self.palette.accent()
        };
        frame.render_stateful_widget(
            List::new(nav_items)
                .block(
                    Block::default()
                        .borders(Borders::RIGHT)
                        .border_style(self.palette.border()),
                )
                .highlight_style(nav_highlight),
            nav_area,
            &mut self.state.nav_state,
        );

        let section = self.state.section;
        let mut lines = vec![
            Line::from(Span::styled(
                section.label(),
                self.palette.base().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(section.description(), self.palette.muted())),
            Line::from(""),
        ];
        lines.extend(self.section_body(section));

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().padding(Padding::new(2, 1, 1, 0))),
            content_area,
        );
    }

    fn field_style(&self, active: bool) -> ratatui::style::Style {
        if active && self.state.focus == Focus::Content {
            self.palette.selected()
        } else {
            self.palette.base()
        }
    }

    fn section_body(&self, section: Section) -> Vec<Line<'static>> {
        match section {
            Section::Profile => {
                let name = &self.state.profile.display_name;
                let name_text = if name.is_empty() { "Your name" } else { name.as_str() };
                let name_style = if name.is_empty() {
                    self.field_style(self.state.field == ProfileField::DisplayName)
                        .add_modifier(Modifier::ITALIC)
                } else {
                    self.field_style(self.state.field == ProfileField::DisplayName)
                };
                let styles = CommunicationStyle::ALL
                    .iter()
                    .map(|s| {
                        if *s == self.state.profile.communication_style {
                            format!("[{}]", s.label())
                        } else {
                            format!(" {} ", s.label())
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                vec![
                    Line::from(Span::styled("Display name", self.palette.muted())),
                    Line::from(Span::styled(format!(" {name_text} "), name_style)),
                    Line::from(""),
                    Line::from(Span::styled("Communication style", self.palette.muted())),
                    Line::from(Span::styled(
                        styles,
                        self.field_style(self.state.field == ProfileField::Style),
                    )),
                ]
            }
            Section::AgentStudio => AGENT_CARDS
                .iter()
                .flat_map(|(name, blurb)| {
                    [
                        Line::from(Span::styled(
                            format!("▍{name}"),
                            self.palette.accent().add_modifier(Modifier::BOLD),
                        )),
                        Line::from(Span::styled(format!("▍{blurb}"), self.palette.muted())),
                        Line::from(""),
                    ]
                })
                .collect(),
            Section::Settings => {
                let options = [Theme::Light, Theme::Dark]
                    .iter()
                    .map(|t| {
                        if *t == self.state.theme {
                            format!("[{}]", t.label())
                        } else {
                            format!(" {} ", t.label())
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                vec![
                    Line::from(Span::styled(
                        "Display preferences",
                        self.palette.base().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![
                        Span::styled("Theme  ", self.palette.muted()),
                        Span::styled(options, self.field_style(true)),
                    ]),
                ]
            }
            other => vec![Line::from(Span::styled(
                other.coming_soon().unwrap_or_default(),
                self.palette.muted().add_modifier(Modifier::ITALIC),
            ))],
        }
    }
}
