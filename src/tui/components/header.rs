//! # Header Component
//!
//! Top bar showing the product name, the theme indicator and the global
//! shortcuts (sidebar, search, theme, settings).
//!
//! Header is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ```rust,ignore
//! let mut header = Header::new(&app.assistant_name, app.theme, app.is_waiting(), &palette);
//! header.render(frame, area);
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::theme::Theme;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

const HINTS: &str = "^B chats  ^K search  ^T theme  ^G settings";

pub struct Header<'a> {
    pub assistant_name: &'a str,
    pub theme: Theme,
    /// A reply is in flight
    pub is_waiting: bool,
    pub palette: &'a Palette,
}

impl<'a> Header<'a> {
    pub fn new(assistant_name: &'a str, theme: Theme, is_waiting: bool, palette: &'a Palette) -> Self {
        Self {
            assistant_name,
            theme,
            is_waiting,
            palette,
        }
    }

    fn theme_icon(&self) -> &'static str {
        // Shows the theme a toggle would switch to
        if self.theme.is_dark() { "☀" } else { "☾" }
    }
}

impl<'a> Component for Header<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(HINTS.len() as u16 + 4)])
                .areas(area);

        let mut left = vec![
            Span::styled(" ☰ ", self.palette.muted()),
            Span::styled(
                "◉ ",
                self.palette.accent().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.assistant_name.to_string(),
                self.palette.base().add_modifier(Modifier::BOLD),
            ),
        ];
        if self.is_waiting {
            left.push(Span::styled("  thinking…", self.palette.muted()));
        }
        frame.render_widget(
            Paragraph::new(Line::from(left)).style(self.palette.base()),
            left_area,
        );

        let right = Line::from(vec![
            Span::styled(HINTS, self.palette.muted()),
            Span::styled(format!("  {} ", self.theme_icon()), self.palette.accent()),
        ]);
        frame.render_widget(
            Paragraph::new(right)
                .alignment(Alignment::Right)
                .style(self.palette.base()),
            right_area,
        );
    }
}
