//! # File Picker Component
//!
//! Overlay listing the files of a directory that match the attach menu's
//! type hint. Picking a file only forwards its path; nothing is read.

use std::path::{Path, PathBuf};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState, Paragraph};

use crate::core::attachment::{AttachmentError, file_name, list_candidates};
use crate::core::types::AttachmentKind;
use crate::tui::component::EventHandler;
use crate::tui::components::overlay::{centered_rect, truncate_str};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

#[derive(Debug, Clone, PartialEq)]
pub enum FilePickerEvent {
    Picked(AttachmentKind, PathBuf),
    Dismiss,
}

pub struct FilePickerState {
    pub kind: AttachmentKind,
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
    list_state: ListState,
}

impl FilePickerState {
    pub fn open(dir: &Path, kind: AttachmentKind) -> Result<Self, AttachmentError> {
        let files = list_candidates(dir, kind)?;
        let mut list_state = ListState::default();
        list_state.select((!files.is_empty()).then_some(0));
        Ok(Self {
            kind,
            dir: dir.to_path_buf(),
            files,
            list_state,
        })
    }

    pub fn selected(&self) -> Option<&PathBuf> {
        self.list_state.selected().and_then(|i| self.files.get(i))
    }
}

impl EventHandler for FilePickerState {
    type Event = FilePickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(FilePickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.list_state.select_previous();
                None
            }
            TuiEvent::CursorDown => {
                if !self.files.is_empty() {
                    let next = self
                        .list_state
                        .selected()
                        .map_or(0, |i| (i + 1).min(self.files.len() - 1));
                    self.list_state.select(Some(next));
                }
                None
            }
            TuiEvent::Submit => self
                .selected()
                .map(|path| FilePickerEvent::Picked(self.kind, path.clone())),
            _ => None,
        }
    }
}

pub struct FilePicker<'a> {
    state: &'a mut FilePickerState,
    palette: &'a Palette,
}

impl<'a> FilePicker<'a> {
    pub fn new(state: &'a mut FilePickerState, palette: &'a Palette) -> Self {
        Self { state, palette }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 60, area);
        frame.render_widget(Clear, overlay);

        let dir = truncate_str(
            &self.state.dir.display().to_string(),
            overlay.width.saturating_sub(6) as usize,
        );
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.palette.accent())
            .title(format!(" {} ", self.state.kind.label()))
            .title_bottom(Line::from(format!(" {dir} ")).left_aligned())
            .title_bottom(Line::from(" Enter attach · Esc cancel ").right_aligned())
            .style(self.palette.base());

        if self.state.files.is_empty() {
            frame.render_widget(
                Paragraph::new("No matching files in this directory.")
                    .style(self.palette.muted())
                    .centered()
                    .block(block),
                overlay,
            );
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .files
            .iter()
            .map(|path| ListItem::new(format!(" {}", file_name(path))))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(self.palette.selected())
            .highlight_symbol("▸");
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::fs::File;

    fn dir_with(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in files {
            File::create(dir.path().join(name)).unwrap();
        }
        dir
    }

    #[test]
    fn lists_only_matching_files() {
        let dir = dir_with(&["a.png", "b.pdf", "c.txt"]);
        let picker = FilePickerState::open(dir.path(), AttachmentKind::Document).unwrap();
        assert_eq!(picker.files.len(), 1);
        assert_eq!(file_name(&picker.files[0]), "b.pdf");
    }

    #[test]
    fn enter_picks_selected_path() {
        let dir = dir_with(&["a.png", "b.jpg"]);
        let mut picker = FilePickerState::open(dir.path(), AttachmentKind::Image).unwrap();
        picker.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            picker.handle_event(&TuiEvent::Submit),
            Some(FilePickerEvent::Picked(
                AttachmentKind::Image,
                dir.path().join("b.jpg")
            ))
        );
    }

    #[test]
    fn empty_directory_cannot_pick() {
        let dir = dir_with(&[]);
        let mut picker = FilePickerState::open(dir.path(), AttachmentKind::Any).unwrap();
        assert_eq!(picker.handle_event(&TuiEvent::Submit), None);
        assert_eq!(picker.handle_event(&TuiEvent::Escape), Some(FilePickerEvent::Dismiss));

        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let palette = Palette::for_theme(Theme::Light);
        terminal
            .draw(|f| FilePicker::new(&mut picker, &palette).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No matching files"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(FilePickerState::open(&missing, AttachmentKind::Any).is_err());
    }
}
