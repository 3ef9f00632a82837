//! Colors for the light and dark themes.
//!
//! Components never hardcode colors; they take a `&Palette` prop derived
//! from `App::theme`, so toggling the theme restyles the whole screen.

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::Theme;
use crate::core::toast::ToastKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub user: Color,
    pub assistant: Color,
    pub selection: Color,
    pub success: Color,
    pub info: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Light => Palette {
                background: Color::Rgb(250, 247, 240),
                foreground: Color::Rgb(40, 40, 48),
                muted: Color::Rgb(120, 118, 128),
                accent: Color::Rgb(104, 78, 214),
                border: Color::Rgb(200, 196, 188),
                user: Color::Rgb(104, 78, 214),
                assistant: Color::Rgb(40, 40, 48),
                selection: Color::Rgb(232, 226, 250),
                success: Color::Rgb(34, 139, 84),
                info: Color::Rgb(37, 99, 180),
                error: Color::Rgb(190, 40, 50),
            },
            Theme::Dark => Palette {
                background: Color::Rgb(18, 18, 28),
                foreground: Color::Rgb(226, 226, 236),
                muted: Color::Rgb(130, 130, 150),
                accent: Color::Rgb(150, 125, 255),
                border: Color::Rgb(60, 60, 80),
                user: Color::Rgb(150, 125, 255),
                assistant: Color::Rgb(226, 226, 236),
                selection: Color::Rgb(44, 40, 72),
                success: Color::Rgb(80, 200, 130),
                info: Color::Rgb(110, 170, 255),
                error: Color::Rgb(255, 110, 110),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Highlighted row in lists and menus.
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn toast(&self, kind: ToastKind) -> Style {
        let color = match kind {
            ToastKind::Success => self.success,
            ToastKind::Info => self.info,
            ToastKind::Error => self.error,
        };
        Style::default().fg(color)
    }
}
