//! # Welcome Banner Component
//!
//! Displays the product name and the time-of-day greeting when the
//! conversation is empty.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub struct WelcomeBanner<'a> {
    pub assistant_name: &'a str,
    pub greeting: &'a str,
    pub palette: &'a Palette,
}

impl<'a> WelcomeBanner<'a> {
    pub fn new(assistant_name: &'a str, greeting: &'a str, palette: &'a Palette) -> Self {
        Self {
            assistant_name,
            greeting,
            palette,
        }
    }
}

impl<'a> Component for WelcomeBanner<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text_lines = vec![
            Line::from(Span::styled(
                "◉",
                self.palette.accent().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.assistant_name.to_string(),
                self.palette.base().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(self.greeting.to_string(), self.palette.muted())),
            Line::from(""),
            Line::from(Span::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                self.palette.muted().add_modifier(Modifier::DIM),
            )),
        ];

        // Center the whole group vertically
        let text_height = text_lines.len() as u16 + 1; // greeting may wrap once
        let [centered] = Layout::vertical([Constraint::Length(text_height)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(text_lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, centered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn renders_name_and_greeting() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let palette = Palette::for_theme(Theme::Dark);
        let mut banner = WelcomeBanner::new("ORION", "Good evening.", &palette);
        terminal.draw(|f| banner.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("ORION"));
        assert!(text.contains("Good evening."));
    }
}
