use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Always handled by the event loop
    ForceQuit, // Ctrl+C
    Resize,

    // Global shortcuts
    OpenSearch,      // Ctrl+K / Cmd+K
    ToggleSidebar,   // Ctrl+B
    OpenSettings,    // Ctrl+G
    ToggleTheme,     // Ctrl+T
    ToggleRecording, // Ctrl+R
    OpenAttachMenu,  // Ctrl+U
    OpenToolMenu,    // Ctrl+L
    NewConversation, // Ctrl+N

    // Editing / navigation, routed to the focused component
    Submit,
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    Escape,
    Tab,
    BackTab,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    MouseMove(u16, u16),
    MouseClick(u16, u16),
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(ev) => translate(ev),
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Map a crossterm event to a `TuiEvent`.
pub fn translate(ev: Event) -> Option<TuiEvent> {
    match ev {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Moved => Some(TuiEvent::MouseMove(mouse_event.column, mouse_event.row)),
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Map a key press to a `TuiEvent`. Key releases are ignored (the keyboard
/// enhancement protocol reports them).
pub fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );

    let mods = key_event.modifiers;
    let command = mods.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);

    if command && let KeyCode::Char(c) = key_event.code {
        return match c.to_ascii_lowercase() {
            'k' => Some(TuiEvent::OpenSearch),
            'c' if mods.contains(KeyModifiers::CONTROL) => Some(TuiEvent::ForceQuit),
            'b' => Some(TuiEvent::ToggleSidebar),
            'g' => Some(TuiEvent::OpenSettings),
            't' => Some(TuiEvent::ToggleTheme),
            'r' => Some(TuiEvent::ToggleRecording),
            'u' => Some(TuiEvent::OpenAttachMenu),
            'l' => Some(TuiEvent::OpenToolMenu),
            'n' => Some(TuiEvent::NewConversation),
            // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
            'j' => Some(TuiEvent::InputChar('\n')),
            _ => None,
        };
    }

    match key_event.code {
        // Shift+Enter inserts a newline instead of sending
        KeyCode::Enter if mods.contains(KeyModifiers::SHIFT) => Some(TuiEvent::InputChar('\n')),
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Esc => Some(TuiEvent::Escape),
        KeyCode::Tab => Some(TuiEvent::Tab),
        KeyCode::BackTab => Some(TuiEvent::BackTab),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Up => Some(TuiEvent::CursorUp),
        KeyCode::Down => Some(TuiEvent::CursorDown),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
        KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn enter_submits() {
        assert_eq!(
            translate_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(TuiEvent::Submit)
        );
    }

    #[test]
    fn shift_enter_inserts_newline() {
        assert_eq!(
            translate_key(key(KeyCode::Enter, KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('\n'))
        );
    }

    #[test]
    fn ctrl_or_cmd_k_opens_search() {
        assert_eq!(
            translate_key(key(KeyCode::Char('k'), KeyModifiers::CONTROL)),
            Some(TuiEvent::OpenSearch)
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('k'), KeyModifiers::SUPER)),
            Some(TuiEvent::OpenSearch)
        );
        // Plain k is text
        assert_eq!(
            translate_key(key(KeyCode::Char('k'), KeyModifiers::NONE)),
            Some(TuiEvent::InputChar('k'))
        );
    }

    #[test]
    fn ctrl_c_force_quits_but_cmd_c_does_not() {
        assert_eq!(
            translate_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('c'), KeyModifiers::SUPER)),
            None
        );
    }

    #[test]
    fn releases_are_ignored() {
        let mut release = key(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate_key(release), None);
    }

    #[test]
    fn unknown_ctrl_chords_are_dropped() {
        assert_eq!(
            translate_key(key(KeyCode::Char('z'), KeyModifiers::CONTROL)),
            None
        );
    }
}
