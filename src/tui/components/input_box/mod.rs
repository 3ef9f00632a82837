//! # InputBox Component
//!
//! The chat composer: text entry, simulated voice recording, and the attach
//! and tool pick menus.
//!
//! ## Modes
//!
//! The box is either editing text or recording, never both. While recording,
//! typed characters are ignored and the controls row shows the elapsed time.
//! Stopping replaces the buffer with the placeholder transcript.
//!
//! ## State Management
//!
//! The buffer, cursor, recorder and open menu are internal state. The
//! palette is a prop passed at render time.

mod cursor;
mod text_wrap;

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::recording::{Recorder, format_elapsed};
use crate::core::types::{AttachmentKind, ToolKind};
use crate::tui::component::EventHandler;
use crate::tui::components::pick_menu::{PickMenuEvent, PickMenuState};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    wrap_line_count, wrap_options,
};

pub const PLACEHOLDER: &str = "Assign a task or explore an idea...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Trimmed, non-empty text to send
    Submit(String),
    RecordingStarted,
    /// Recording stopped; the buffer now holds the transcript
    RecordingStopped,
    AttachPicked(AttachmentKind),
    ToolPicked(ToolKind),
    /// Buffer, cursor or menu changed
    ContentChanged,
}

enum Menu {
    Attach(PickMenuState<AttachmentKind>),
    Tools(PickMenuState<ToolKind>),
}

pub struct InputBox {
    pub buffer: String,
    /// Message-cursor mode has focus (prop)
    pub dimmed: bool,
    cursor: CursorState,
    recorder: Recorder,
    menu: Option<Menu>,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            dimmed: false,
            cursor: CursorState::new(),
            recorder: Recorder::new(),
            menu: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.recorder.elapsed_secs()
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_some()
    }

    /// Sending is possible only with non-blank text outside a recording.
    pub fn can_send(&self) -> bool {
        !self.is_recording() && !self.buffer.trim().is_empty()
    }

    /// Advance the recording counter. Returns true when a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.recorder.tick(now)
    }

    pub fn toggle_recording(&mut self, now: Instant) -> InputEvent {
        match self.recorder.stop() {
            Some(transcript) => {
                self.buffer = transcript.to_string();
                self.cursor.pos = self.buffer.len();
                log::debug!("recording stopped");
                InputEvent::RecordingStopped
            }
            None => {
                self.menu = None;
                self.recorder.start(now);
                log::debug!("recording started");
                InputEvent::RecordingStarted
            }
        }
    }

    pub fn open_attach_menu(&mut self) {
        let items = AttachmentKind::ALL.iter().map(|k| (*k, k.label())).collect();
        self.menu = Some(Menu::Attach(PickMenuState::new("Attach", items)));
    }

    pub fn open_tool_menu(&mut self) {
        let items = ToolKind::ALL.iter().map(|t| (*t, t.label())).collect();
        self.menu = Some(Menu::Tools(PickMenuState::new("Tools", items)));
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    /// Height for the current buffer, between one and `MAX_VISIBLE_LINES` rows of text.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let rows = wrap_line_count(&self.buffer, inner_width(width));
        rows.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn visible_lines(&self, width: u16) -> Vec<String> {
        let width = inner_width(width);
        if width == 0 {
            return Vec::new();
        }
        textwrap::wrap(&self.buffer, wrap_options(width))
            .into_iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .map(|l| l.into_owned())
            .collect()
    }

    fn controls_line(&self, palette: &Palette) -> Line<'static> {
        if self.is_recording() {
            return Line::from(vec![
                Span::styled("● ", palette.toast(crate::core::toast::ToastKind::Error)),
                Span::styled(
                    format!("Recording {}", format_elapsed(self.elapsed_secs())),
                    palette.base().add_modifier(Modifier::BOLD),
                ),
                Span::styled("   ^R stop", palette.muted()),
            ]);
        }
        let send_style = if self.can_send() {
            palette.accent().add_modifier(Modifier::BOLD)
        } else {
            palette.muted().add_modifier(Modifier::DIM)
        };
        Line::from(vec![
            Span::styled("^U attach  ^L tools  ^R record", palette.muted()),
            Span::styled("   ↵ send", send_style),
        ])
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        self.cursor.last_width = area.width;
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(if self.is_recording() {
                palette.toast(crate::core::toast::ToastKind::Error)
            } else if self.dimmed {
                palette.border().add_modifier(Modifier::DIM)
            } else {
                palette.accent()
            })
            .padding(Padding::horizontal(1))
            .style(palette.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text_rows = inner.height.saturating_sub(1);
        let text_area = Rect { height: text_rows, ..inner };
        let controls_area = Rect {
            y: inner.y + text_rows,
            height: inner.height.min(1),
            ..inner
        };

        if self.buffer.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    PLACEHOLDER,
                    palette.muted().add_modifier(Modifier::ITALIC),
                )),
                text_area,
            );
        } else {
            let lines: Vec<Line> = self.visible_lines(area.width).into_iter().map(Line::from).collect();
            frame.render_widget(Paragraph::new(lines), text_area);
        }
        frame.render_widget(Paragraph::new(self.controls_line(palette)), controls_area);

        let show_cursor = !self.is_recording() && !self.dimmed;
        match &mut self.menu {
            Some(Menu::Attach(menu)) => {
                let menu_area = menu.area_above(area, frame.area());
                menu.render(frame, menu_area, palette);
            }
            Some(Menu::Tools(menu)) => {
                let menu_area = menu.area_above(area, frame.area());
                menu.render(frame, menu_area, palette);
            }
            None if show_cursor => {
                let (x, y) = self.cursor.screen_pos(&self.buffer, area);
                frame.set_cursor_position((x, y));
            }
            None => {}
        }
    }

    fn handle_menu_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        let picked = match self.menu.as_mut()? {
            Menu::Attach(menu) => match menu.handle_event(event)? {
                PickMenuEvent::Picked(kind) => Some(InputEvent::AttachPicked(kind)),
                PickMenuEvent::Closed => None,
            },
            Menu::Tools(menu) => match menu.handle_event(event)? {
                PickMenuEvent::Picked(tool) => Some(InputEvent::ToolPicked(tool)),
                PickMenuEvent::Closed => None,
            },
        };
        self.menu = None;
        Some(picked.unwrap_or(InputEvent::ContentChanged))
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        if self.is_recording() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        Some(InputEvent::ContentChanged)
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.menu.is_some() && *event == TuiEvent::ToggleRecording {
            self.menu = None;
        }
        if self.menu.is_some() {
            // Menu swallows everything else while open
            return self.handle_menu_event(event).or(Some(InputEvent::ContentChanged));
        }
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace if !self.is_recording() && self.cursor.pos > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if !self.is_recording() && self.cursor.pos < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if self.cursor.pos > 0 => {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if self.cursor.pos < self.buffer.len() => {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos].rfind('\n').map_or(0, |i| i + 1);
                (self.cursor.pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| self.cursor.pos + i);
                (self.cursor.pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::Submit if self.can_send() => {
                let text = std::mem::take(&mut self.buffer).trim().to_string();
                self.cursor.reset();
                Some(InputEvent::Submit(text))
            }
            TuiEvent::ToggleRecording => Some(self.toggle_recording(Instant::now())),
            TuiEvent::OpenAttachMenu if !self.is_recording() => {
                self.open_attach_menu();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::OpenToolMenu if !self.is_recording() => {
                self.open_tool_menu();
                Some(InputEvent::ContentChanged)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recording::PLACEHOLDER_TRANSCRIPT;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn type_text(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn render_text(input: &mut InputBox) -> String {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let palette = Palette::for_theme(Theme::Light);
        terminal
            .draw(|f| {
                let area = Rect::new(0, 4, 60, 4);
                input.render(f, area, &palette);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn editing() {
        let mut input = InputBox::new();
        type_text(&mut input, "ab");
        assert_eq!(input.buffer, "ab");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('é'));
        assert_eq!(input.buffer, "aéb");
        assert_eq!(input.handle_event(&TuiEvent::Backspace), Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "ab");
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn submit_trims_and_clears() {
        let mut input = InputBox::new();
        type_text(&mut input, "  hello  ");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("hello".into()))
        );
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut input = InputBox::new();
        type_text(&mut input, "   ");
        assert!(!input.can_send());
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "   ");
    }

    #[test]
    fn newline_is_inserted_literally() {
        let mut input = InputBox::new();
        type_text(&mut input, "a");
        input.handle_event(&TuiEvent::InputChar('\n'));
        type_text(&mut input, "b");
        assert_eq!(input.buffer, "a\nb");
    }

    #[test]
    fn recording_blocks_typing_and_yields_transcript() {
        let mut input = InputBox::new();
        let start = Instant::now();
        assert_eq!(input.toggle_recording(start), InputEvent::RecordingStarted);
        assert_eq!(input.handle_event(&TuiEvent::InputChar('x')), None);
        assert!(input.buffer.is_empty());
        assert!(input.tick(start + Duration::from_millis(2100)));
        assert_eq!(input.elapsed_secs(), 2);
        assert!(!input.can_send());

        assert_eq!(input.toggle_recording(start), InputEvent::RecordingStopped);
        assert_eq!(input.elapsed_secs(), 0);
        assert_eq!(input.buffer, PLACEHOLDER_TRANSCRIPT);
        assert!(!input.tick(start + Duration::from_secs(10)));
    }

    #[test]
    fn record_shortcut_closes_open_menu() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::OpenAttachMenu);
        assert!(input.menu_open());
        assert_eq!(
            input.handle_event(&TuiEvent::ToggleRecording),
            Some(InputEvent::RecordingStarted)
        );
        assert!(input.is_recording());
        assert!(!input.menu_open());
    }

    #[test]
    fn tool_menu_picks_tool() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::OpenToolMenu);
        assert!(input.menu_open());
        // Typing goes to the menu, not the buffer
        input.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::ToolPicked(ToolKind::Translator))
        );
        assert!(!input.menu_open());
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn attach_menu_escape_closes() {
        let mut input = InputBox::new();
        input.open_attach_menu();
        assert_eq!(input.handle_event(&TuiEvent::Escape), Some(InputEvent::ContentChanged));
        assert!(!input.menu_open());
    }

    #[test]
    fn height_grows_then_caps() {
        let mut input = InputBox::new();
        assert_eq!(input.calculate_height(40), 1 + VERTICAL_OVERHEAD);
        type_text(&mut input, "a\nb\nc");
        assert_eq!(input.calculate_height(40), 3 + VERTICAL_OVERHEAD);
        type_text(&mut input, "\nd\ne\nf\ng\nh");
        assert_eq!(input.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn renders_placeholder_and_recording_timer() {
        let mut input = InputBox::new();
        let text = render_text(&mut input);
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("^R record"));

        let start = Instant::now();
        input.toggle_recording(start);
        input.tick(start + Duration::from_secs(65));
        assert!(render_text(&mut input).contains("Recording 1:05"));
    }
}
