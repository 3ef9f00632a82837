//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! Events go to the topmost surface first:
//!
//! ```text
//! ForceQuit → search (unless the palette is up) → file picker
//!           → control center → palette → sidebar → global shortcuts
//!           → mouse → scroll → input / cursor mode
//! ```
//!
//! ## Redraw Strategy
//!
//! The loop only draws when something changed. While a recording is running
//! or toasts are visible it wakes every 100ms to advance the counter and
//! expire toasts; otherwise it sleeps up to 500ms.

mod component;
mod components;
mod event;
mod palette;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use chrono::Timelike;
use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::data::MockDataSource;
use crate::core::reply::{CannedReplyProvider, ReplyProvider};
use crate::core::state::App;
use crate::core::types::{FeedbackKind, Role};
use crate::core::welcome::Welcome;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CommandPaletteState, ControlCenterState, ControlEvent, FilePickerEvent, FilePickerState,
    InputBox, InputEvent, MessageListState, PaletteEvent, SidebarEvent, SidebarState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const FAST_POLL: Duration = Duration::from_millis(100);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigate messages with arrow keys. Typing auto-switches to Input.
    Cursor,
    /// Text editing in the input box. Esc switches to Cursor.
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub input_mode: InputMode,
    pub sidebar: SidebarState,
    // Overlays (None = hidden)
    pub command_palette: Option<CommandPaletteState>,
    pub control_center: Option<ControlCenterState>,
    pub file_picker: Option<FilePickerState>,
    pub welcome: Welcome,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            input_mode: InputMode::Input, // User expects to type immediately
            sidebar: SidebarState::default(),
            command_palette: None,
            control_center: None,
            file_picker: None,
            welcome: Welcome::new(),
        }
    }

    /// Create or drop overlay states to mirror the panel flags in `App`.
    fn sync_overlays(&mut self, app: &App, sidebar_was_open: bool) {
        if app.sidebar_open && !sidebar_was_open {
            self.sidebar
                .open(&app.conversations, app.current_conversation_id.as_deref());
        }
        match (app.search_open, self.command_palette.is_some()) {
            (true, false) => {
                self.command_palette = Some(CommandPaletteState::new(app.search_corpus()))
            }
            (false, true) => self.command_palette = None,
            _ => {}
        }
        match (app.settings_open, self.control_center.is_some()) {
            (true, false) => {
                self.control_center = Some(ControlCenterState::new(app.profile.clone(), app.theme))
            }
            (false, true) => self.control_center = None,
            _ => {}
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol distinguishes Shift+Enter; terminals
        // without it ignore the flags
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Whether the event loop keeps running after an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Background work started on behalf of `update()`.
struct Tasks {
    tx: mpsc::Sender<Action>,
    replies: Vec<AbortHandle>,
}

impl Tasks {
    fn new(tx: mpsc::Sender<Action>) -> Self {
        Self {
            tx,
            replies: Vec::new(),
        }
    }

    fn perform(&mut self, app: &App, effect: Effect) -> Flow {
        if effect != Effect::None {
            debug!("Effect: {:?}", effect);
        }
        match effect {
            Effect::None => {}
            Effect::SpawnReply { prompt, generation } => {
                self.replies.retain(|handle| !handle.is_finished());
                self.replies.push(spawn_reply(
                    app.replies.clone(),
                    prompt,
                    generation,
                    app.reply_delay,
                    self.tx.clone(),
                ));
            }
            Effect::CancelReplies => self.cancel_replies(),
            Effect::CopyToClipboard(text) => {
                let action = match copy_to_clipboard(&text) {
                    Ok(()) => Action::Copied,
                    Err(e) => {
                        warn!("Clipboard write failed: {}", e);
                        Action::CopyFailed(e.to_string())
                    }
                };
                if self.tx.send(action).is_err() {
                    warn!("Failed to report clipboard result: receiver dropped");
                }
            }
            Effect::Quit => {
                self.cancel_replies();
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    fn cancel_replies(&mut self) {
        if !self.replies.is_empty() {
            info!("Cancelling {} reply task(s)", self.replies.len());
        }
        for handle in self.replies.drain(..) {
            handle.abort();
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_owned())
}

/// Wait `delay`, then ask the provider for the reply and post it back.
fn spawn_reply(
    replies: Arc<dyn ReplyProvider>,
    prompt: String,
    generation: u64,
    delay: Duration,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning reply task (provider={}, generation={}, delay={}ms)",
        replies.name(),
        generation,
        delay.as_millis()
    );
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let action = match replies.reply(&prompt).await {
            Ok(message) => Action::ReplyReady {
                generation,
                message,
            },
            Err(e) => {
                warn!("Reply provider failed: {}", e);
                Action::ReplyFailed {
                    generation,
                    error: e.to_string(),
                }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver reply: receiver dropped");
        }
    });
    handle.abort_handle()
}

/// Run `update()` and keep the TUI-side state in step with the result.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let sidebar_was_open = app.sidebar_open;
    let resets_timeline = matches!(action, Action::NewConversation);
    let effect = update(app, action);
    if resets_timeline {
        tui.message_list.reset();
        tui.input_mode = InputMode::Input;
    }
    tui.sync_overlays(app, sidebar_was_open);
    effect
}

/// Route one terminal event. `frame_area` is the last drawn screen size,
/// used for mouse hit testing.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent, frame_area: Rect) -> Effect {
    if matches!(event, TuiEvent::ForceQuit) {
        return dispatch(app, tui, Action::Quit);
    }

    // Search opens from anywhere; it replaces whatever panel is up
    if matches!(event, TuiEvent::OpenSearch) && tui.command_palette.is_none() {
        tui.file_picker = None;
        if app.settings_open {
            dispatch(app, tui, Action::CloseSettings);
        }
        if app.sidebar_open {
            dispatch(app, tui, Action::CloseSidebar);
        }
        return dispatch(app, tui, Action::OpenSearch);
    }

    // Overlays take everything while open, topmost first
    if let Some(picker) = tui.file_picker.as_mut() {
        return match picker.handle_event(&event) {
            Some(FilePickerEvent::Picked(kind, path)) => {
                tui.file_picker = None;
                dispatch(app, tui, Action::FileAttached { kind, path })
            }
            Some(FilePickerEvent::Dismiss) => {
                tui.file_picker = None;
                Effect::None
            }
            None => Effect::None,
        };
    }
    if let Some(center) = tui.control_center.as_mut() {
        return match center.handle_event(&event) {
            Some(ControlEvent::ProfileChanged(profile)) => {
                dispatch(app, tui, Action::UpdateProfile(profile))
            }
            Some(ControlEvent::ThemeChosen(theme)) => dispatch(app, tui, Action::SetTheme(theme)),
            Some(ControlEvent::Dismiss) => dispatch(app, tui, Action::CloseSettings),
            None => Effect::None,
        };
    }
    if let Some(palette) = tui.command_palette.as_mut() {
        return match palette.handle_event(&event) {
            Some(PaletteEvent::Navigate {
                conversation_id,
                message_id,
            }) => dispatch(
                app,
                tui,
                Action::Navigate {
                    conversation_id,
                    message_id,
                },
            ),
            Some(PaletteEvent::Dismiss) => dispatch(app, tui, Action::CloseSearch),
            None => Effect::None,
        };
    }
    if app.sidebar_open {
        return match tui.sidebar.handle_event(&event, &app.conversations) {
            Some(SidebarEvent::Select(id)) => dispatch(app, tui, Action::SelectConversation(id)),
            Some(SidebarEvent::CreateNew) => dispatch(app, tui, Action::NewConversation),
            Some(SidebarEvent::Act(id, action)) => {
                dispatch(app, tui, Action::ConversationAction { id, action })
            }
            Some(SidebarEvent::Dismiss) => dispatch(app, tui, Action::CloseSidebar),
            None => Effect::None,
        };
    }

    // Global shortcuts
    let global = match event {
        TuiEvent::ToggleSidebar => Some(Action::ToggleSidebar),
        TuiEvent::OpenSettings => Some(Action::OpenSettings),
        TuiEvent::ToggleTheme => Some(Action::ToggleTheme),
        TuiEvent::NewConversation => Some(Action::NewConversation),
        _ => None,
    };
    if let Some(action) = global {
        return dispatch(app, tui, action);
    }

    match event {
        // Hover reveals the toolbar of the message under the mouse
        TuiEvent::MouseMove(_, row) => {
            let input_height = tui.input_box.calculate_height(frame_area.width);
            tui.message_list.selected_index =
                ui::hit_test_message(row, frame_area, input_height, &tui.message_list);
            Effect::None
        }
        // Click toggles the thinking trace
        TuiEvent::MouseClick(_, row) => {
            let input_height = tui.input_box.calculate_height(frame_area.width);
            if let Some(idx) = ui::hit_test_message(row, frame_area, input_height, &tui.message_list)
            {
                tui.message_list.selected_index = Some(idx);
                if has_thinking(app, idx) {
                    tui.message_list.toggle_thinking(idx);
                }
            }
            Effect::None
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            Effect::None
        }
        TuiEvent::Resize => Effect::None,
        _ => match tui.input_mode {
            InputMode::Input => handle_input_mode(app, tui, event),
            InputMode::Cursor => handle_cursor_mode(app, tui, event),
        },
    }
}

fn handle_input_mode(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    // Esc → Cursor mode, unless a pick menu wants it
    if matches!(event, TuiEvent::Escape) && !tui.input_box.menu_open() {
        tui.input_mode = InputMode::Cursor;
        tui.message_list.selected_index = app.messages.len().checked_sub(1);
        tui.message_list.scroll_to_selected();
        return Effect::None;
    }

    let Some(input_event) = tui.input_box.handle_event(&event) else {
        return Effect::None;
    };
    match input_event {
        InputEvent::Submit(text) => {
            tui.message_list.stick_to_bottom = true;
            dispatch(app, tui, Action::Submit(text))
        }
        InputEvent::RecordingStarted => dispatch(app, tui, Action::RecordingStarted),
        InputEvent::RecordingStopped => dispatch(app, tui, Action::RecordingStopped),
        InputEvent::AttachPicked(kind) => {
            let opened = std::env::current_dir()
                .map_err(|e| e.to_string())
                .and_then(|dir| FilePickerState::open(&dir, kind).map_err(|e| e.to_string()));
            match opened {
                Ok(picker) => {
                    tui.file_picker = Some(picker);
                    Effect::None
                }
                Err(reason) => dispatch(app, tui, Action::AttachFailed(reason)),
            }
        }
        InputEvent::ToolPicked(tool) => dispatch(app, tui, Action::ToolSelected(tool)),
        InputEvent::ContentChanged => Effect::None,
    }
}

fn handle_cursor_mode(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let selected = tui
        .message_list
        .selected_index
        .and_then(|idx| app.messages.get(idx).map(|m| (idx, m)));
    let assistant = selected.filter(|(_, m)| m.role == Role::Assistant);

    // Toolbar keys act on the selected assistant message
    if let (Some((idx, message)), TuiEvent::InputChar(c)) = (assistant, &event) {
        let id = message.id.clone();
        let action = match c {
            ' ' => {
                if message.thinking_process.is_some() {
                    tui.message_list.toggle_thinking(idx);
                }
                return Effect::None;
            }
            'c' => Some(Action::CopyMessage(id)),
            'r' => Some(Action::Regenerate(id)),
            's' => Some(Action::Share(id)),
            '+' => Some(Action::Feedback {
                id,
                kind: FeedbackKind::Positive,
            }),
            '-' => Some(Action::Feedback {
                id,
                kind: FeedbackKind::Negative,
            }),
            '1'..='9' => c
                .to_digit(10)
                .and_then(|n| message.suggestions.get(n as usize - 1))
                .map(|s| Action::SuggestionPicked(s.clone())),
            _ => None,
        };
        if let Some(action) = action {
            return dispatch(app, tui, action);
        }
    }

    match event {
        TuiEvent::CursorUp => {
            tui.message_list.select_prev(app.messages.len());
            Effect::None
        }
        TuiEvent::CursorDown => {
            tui.message_list.select_next(app.messages.len());
            Effect::None
        }
        TuiEvent::Escape => Effect::None,
        // Enter switches to Input mode
        TuiEvent::Submit => {
            tui.input_mode = InputMode::Input;
            tui.message_list.selected_index = None;
            Effect::None
        }
        // Typing and composer shortcuts switch to Input mode and forward the event
        _ => {
            tui.input_mode = InputMode::Input;
            tui.message_list.selected_index = None;
            handle_input_mode(app, tui, event)
        }
    }
}

fn has_thinking(app: &App, idx: usize) -> bool {
    app.messages
        .get(idx)
        .is_some_and(|m| m.thinking_process.is_some())
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::new(
        Arc::new(MockDataSource),
        Arc::new(CannedReplyProvider::new(config.assistant_name.clone())),
        &config,
    );
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut tasks = Tasks::new(tx);
    let mut rng = rand::thread_rng();

    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let now = Instant::now();
        let user_name = Some(app.profile.display_name.as_str()).filter(|n| !n.is_empty());
        if tui.welcome.refresh(chrono::Local::now().hour(), user_name, &mut rng) {
            needs_redraw = true;
        }
        if app.toasts.expire(now) {
            needs_redraw = true;
        }
        if tui.input_box.tick(now) {
            needs_redraw = true;
        }
        tui.input_box.dimmed = tui.input_mode == InputMode::Cursor;

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if tui.input_box.is_recording() || !app.toasts.is_empty() {
            FAST_POLL
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        let frame_area = terminal.get_frame().area();
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = handle_event(&mut app, &mut tui, event, frame_area);
            if tasks.perform(&app, effect) == Flow::Quit {
                break 'main;
            }
        }

        // Actions from background tasks (replies, clipboard results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            let effect = dispatch(&mut app, &mut tui, action);
            if tasks.perform(&app, effect) == Flow::Quit {
                break 'main;
            }
        }
    }

    tasks.cancel_replies();
    ratatui::restore();
    info!("ORION exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use crate::core::types::{AttachmentKind, Message};
    use crate::test_support::test_app;

    const SCREEN: Rect = Rect::new(0, 0, 100, 30);

    fn send(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
        handle_event(app, tui, event, SCREEN)
    }

    fn type_text(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            send(app, tui, TuiEvent::InputChar(c));
        }
    }

    fn with_reply(app: &mut App) {
        app.messages.push(Message::user("hi"));
        let mut reply = Message::assistant("hello");
        reply.suggestions = vec!["one".into(), "two".into(), "three".into()];
        app.messages.push(reply);
    }

    #[test]
    fn enter_submits_and_clears_input() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "X");
        let effect = send(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(
            effect,
            Effect::SpawnReply {
                prompt: "X".into(),
                generation: 0
            }
        );
        assert_eq!(app.messages.len(), 1);
        assert!(tui.input_box.buffer.is_empty());
    }

    #[test]
    fn shift_enter_newline_does_not_send() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "a");
        // Shift+Enter arrives as a newline character
        send(&mut app, &mut tui, TuiEvent::InputChar('\n'));
        assert!(app.messages.is_empty());
        assert_eq!(tui.input_box.buffer, "a\n");
    }

    #[test]
    fn ctrl_k_opens_palette_and_navigation_closes_it() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::OpenSearch);
        assert!(app.search_open);
        assert!(tui.command_palette.is_some());

        type_text(&mut app, &mut tui, "react");
        send(&mut app, &mut tui, TuiEvent::Submit);
        assert!(!app.search_open);
        assert!(tui.command_palette.is_none());
        assert_eq!(
            app.toasts.latest().map(|t| t.text.as_str()),
            Some("Navigating to 2 in conv2")
        );
        // Typed characters went to the palette, not the composer
        assert!(tui.input_box.buffer.is_empty());
    }

    #[test]
    fn ctrl_k_opens_palette_over_sidebar() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::ToggleSidebar);
        send(&mut app, &mut tui, TuiEvent::OpenSearch);
        assert!(app.search_open);
        assert!(!app.sidebar_open);
        assert!(tui.command_palette.is_some());
    }

    #[test]
    fn ctrl_k_opens_palette_over_control_center() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::OpenSettings);
        send(&mut app, &mut tui, TuiEvent::OpenSearch);
        assert!(app.search_open);
        assert!(!app.settings_open);
        assert!(tui.control_center.is_none());
        assert!(tui.command_palette.is_some());
    }

    #[test]
    fn ctrl_k_opens_palette_over_file_picker() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let dir = tempfile::tempdir().unwrap();
        tui.file_picker = Some(
            FilePickerState::open(dir.path(), AttachmentKind::Any).unwrap(),
        );
        send(&mut app, &mut tui, TuiEvent::OpenSearch);
        assert!(app.search_open);
        assert!(tui.file_picker.is_none());
        assert!(tui.command_palette.is_some());
    }

    #[test]
    fn ctrl_k_inside_palette_closes_it() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::OpenSearch);
        send(&mut app, &mut tui, TuiEvent::OpenSearch);
        assert!(!app.search_open);
        assert!(tui.command_palette.is_none());
    }

    #[test]
    fn sidebar_new_conversation_resets_timeline() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        with_reply(&mut app);
        tui.message_list.toggle_thinking(1);

        send(&mut app, &mut tui, TuiEvent::ToggleSidebar);
        assert!(app.sidebar_open);
        let effect = send(&mut app, &mut tui, TuiEvent::InputChar('n'));
        assert_eq!(effect, Effect::CancelReplies);
        assert!(app.messages.is_empty());
        assert!(!app.sidebar_open);
        assert!(tui.message_list.expanded_indices.is_empty());
    }

    #[test]
    fn control_center_changes_theme_in_memory() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::OpenSettings);
        let center = tui.control_center.as_mut().unwrap();
        center.section = crate::tui::components::control_center::Section::Settings;
        center.focus = crate::tui::components::control_center::Focus::Content;

        send(&mut app, &mut tui, TuiEvent::InputChar(' '));
        assert_eq!(app.theme, Theme::Dark);

        send(&mut app, &mut tui, TuiEvent::Escape);
        send(&mut app, &mut tui, TuiEvent::Escape);
        assert!(!app.settings_open);
        assert!(tui.control_center.is_none());
    }

    #[test]
    fn escape_enters_cursor_mode_on_last_message() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        with_reply(&mut app);
        send(&mut app, &mut tui, TuiEvent::Escape);
        assert_eq!(tui.input_mode, InputMode::Cursor);
        assert_eq!(tui.message_list.selected_index, Some(1));

        send(&mut app, &mut tui, TuiEvent::CursorUp);
        assert_eq!(tui.message_list.selected_index, Some(0));
    }

    #[test]
    fn cursor_mode_toolbar_keys() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        with_reply(&mut app);
        let id = app.messages[1].id.clone();
        send(&mut app, &mut tui, TuiEvent::Escape);

        assert_eq!(
            send(&mut app, &mut tui, TuiEvent::InputChar('c')),
            Effect::CopyToClipboard("hello".into())
        );
        send(&mut app, &mut tui, TuiEvent::InputChar('+'));
        assert_eq!(
            app.toasts.latest().map(|t| t.text.as_str()),
            Some("Thanks for the positive feedback!")
        );
        send(&mut app, &mut tui, TuiEvent::InputChar('2'));
        assert_eq!(
            app.toasts.latest().map(|t| t.text.as_str()),
            Some("Feature not implemented yet")
        );
        // Still in cursor mode on the same message
        assert_eq!(tui.input_mode, InputMode::Cursor);
        assert_eq!(app.messages[1].id, id);
    }

    #[test]
    fn typing_in_cursor_mode_returns_to_input() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        with_reply(&mut app);
        send(&mut app, &mut tui, TuiEvent::Escape);
        send(&mut app, &mut tui, TuiEvent::CursorUp); // user message
        send(&mut app, &mut tui, TuiEvent::InputChar('c'));
        assert_eq!(tui.input_mode, InputMode::Input);
        assert_eq!(tui.input_box.buffer, "c");
    }

    #[test]
    fn recording_shortcut_notifies() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::ToggleRecording);
        assert!(tui.input_box.is_recording());
        assert_eq!(
            app.toasts.latest().map(|t| t.text.as_str()),
            Some("Voice recording started")
        );
        send(&mut app, &mut tui, TuiEvent::ToggleRecording);
        assert!(!tui.input_box.is_recording());
        assert!(!tui.input_box.buffer.is_empty());
    }

    #[test]
    fn force_quit_from_any_overlay() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::OpenSearch);
        assert_eq!(send(&mut app, &mut tui, TuiEvent::ForceQuit), Effect::Quit);
    }

    #[tokio::test]
    async fn reply_task_delivers_after_delay() {
        let (tx, rx) = mpsc::channel();
        let replies: Arc<dyn ReplyProvider> = Arc::new(CannedReplyProvider::default());
        spawn_reply(replies, "X".into(), 7, Duration::from_millis(10), tx);

        tokio::time::sleep(Duration::from_millis(200)).await;
        match rx.try_recv() {
            Ok(Action::ReplyReady {
                generation,
                message,
            }) => {
                assert_eq!(generation, 7);
                assert!(message.content.contains("\"X\""));
            }
            other => panic!("expected ReplyReady, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancelled_reply_never_arrives() {
        let (tx, rx) = mpsc::channel();
        let mut tasks = Tasks::new(tx);
        let app = test_app();
        let flow = tasks.perform(
            &app,
            Effect::SpawnReply {
                prompt: "X".into(),
                generation: 0,
            },
        );
        assert_eq!(flow, Flow::Continue);
        assert_eq!(tasks.replies.len(), 1);

        assert_eq!(tasks.perform(&app, Effect::CancelReplies), Flow::Continue);
        assert!(tasks.replies.is_empty());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn quit_aborts_pending_replies() {
        let (tx, rx) = mpsc::channel();
        let mut tasks = Tasks::new(tx);
        let app = test_app();
        tasks.perform(
            &app,
            Effect::SpawnReply {
                prompt: "X".into(),
                generation: 0,
            },
        );
        assert_eq!(tasks.perform(&app, Effect::Quit), Flow::Quit);
        assert!(tasks.replies.is_empty());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
    }
}
