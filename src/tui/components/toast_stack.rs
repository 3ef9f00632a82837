//! Toast notifications stacked in the bottom-right corner, newest last.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::core::toast::{ToastKind, ToastQueue};
use crate::tui::component::Component;
use crate::tui::components::overlay::truncate_str;
use crate::tui::palette::Palette;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 3;

pub struct ToastStack<'a> {
    pub toasts: &'a ToastQueue,
    pub palette: &'a Palette,
}

impl<'a> ToastStack<'a> {
    pub fn new(toasts: &'a ToastQueue, palette: &'a Palette) -> Self {
        Self { toasts, palette }
    }
}

fn icon(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "✓",
        ToastKind::Info => "ℹ",
        ToastKind::Error => "✗",
    }
}

impl<'a> Component for ToastStack<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width.saturating_sub(width + 1);
        let mut bottom = area.y + area.height;

        for toast in self.toasts.iter().collect::<Vec<_>>().into_iter().rev() {
            if bottom < area.y + TOAST_HEIGHT {
                break;
            }
            let rect = Rect::new(x, bottom - TOAST_HEIGHT, width, TOAST_HEIGHT);
            bottom -= TOAST_HEIGHT;

            let style = self.palette.toast(toast.kind);
            let text = truncate_str(&toast.text, width.saturating_sub(6) as usize);
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(format!(" {} ", icon(toast.kind)), style),
                    Span::styled(text, self.palette.base()),
                ]))
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .border_style(style),
                )
                .style(self.palette.base()),
                rect,
            );
        }
    }
}
