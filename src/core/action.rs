//! # Actions
//!
//! Everything that can happen in ORION becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The reply timer fires? That's `Action::ReplyReady { .. }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing the I/O the event
//! loop must perform (spawn the reply task, write the clipboard, ...).
//! No side effects here beyond state and toasts.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::path::PathBuf;

use log::{debug, info};

use crate::core::attachment::file_name;
use crate::core::config::Profile;
use crate::core::state::App;
use crate::core::theme::Theme;
use crate::core::types::{
    AttachmentKind, ConversationAction, FeedbackKind, Message, ToolKind,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User sent text from the chat input.
    Submit(String),
    /// The simulated reply for `generation` is ready.
    ReplyReady { generation: u64, message: Message },
    /// The reply provider reported an error.
    ReplyFailed { generation: u64, error: String },
    NewConversation,
    ToggleSidebar,
    CloseSidebar,
    SelectConversation(String),
    ConversationAction { id: String, action: ConversationAction },
    OpenSearch,
    CloseSearch,
    /// A command palette result was chosen.
    Navigate { conversation_id: String, message_id: String },
    OpenSettings,
    CloseSettings,
    ToggleTheme,
    SetTheme(Theme),
    /// Profile fields edited in the control center (kept in memory only).
    UpdateProfile(Profile),
    FileAttached { kind: AttachmentKind, path: PathBuf },
    AttachFailed(String),
    ToolSelected(ToolKind),
    RecordingStarted,
    RecordingStopped,
    CopyMessage(String),
    /// The clipboard write finished.
    Copied,
    CopyFailed(String),
    Regenerate(String),
    Feedback { id: String, kind: FeedbackKind },
    Share(String),
    SuggestionPicked(String),
    Quit,
}

/// I/O requested by `update()`, performed by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start the delayed reply task for `prompt`.
    SpawnReply { prompt: String, generation: u64 },
    /// Abort every reply task still in flight.
    CancelReplies,
    CopyToClipboard(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Submit(text) => {
            let content = text.trim();
            if content.is_empty() {
                return Effect::None;
            }
            let message = Message::user(content);
            info!("User message {} ({} bytes)", message.id, content.len());
            app.messages.push(message);
            app.pending_replies += 1;
            Effect::SpawnReply {
                prompt: content.to_string(),
                generation: app.generation,
            }
        }
        Action::ReplyReady {
            generation,
            message,
        } => {
            if generation != app.generation {
                debug!(
                    "Dropping stale reply (generation {} != {})",
                    generation, app.generation
                );
                return Effect::None;
            }
            app.pending_replies = app.pending_replies.saturating_sub(1);
            app.messages.push(message);
            Effect::None
        }
        Action::ReplyFailed { generation, error } => {
            if generation == app.generation {
                app.pending_replies = app.pending_replies.saturating_sub(1);
                app.toasts.error(format!("Reply failed: {error}"));
            }
            Effect::None
        }
        Action::NewConversation => {
            app.messages.clear();
            app.sidebar_open = false;
            app.generation += 1;
            app.pending_replies = 0;
            app.toasts.success("New conversation created");
            Effect::CancelReplies
        }
        Action::ToggleSidebar => {
            app.sidebar_open = !app.sidebar_open;
            Effect::None
        }
        Action::CloseSidebar => {
            app.sidebar_open = false;
            Effect::None
        }
        Action::SelectConversation(id) => {
            app.toasts.info(format!("Conversation {id} selected"));
            app.current_conversation_id = Some(id);
            app.sidebar_open = false;
            Effect::None
        }
        Action::ConversationAction { id, action } => {
            // The mock list is never mutated; only confirm.
            app.toasts
                .success(format!("Conversation {id} {}", action.past_tense()));
            Effect::None
        }
        Action::OpenSearch => {
            app.search_open = true;
            Effect::None
        }
        Action::CloseSearch => {
            app.search_open = false;
            Effect::None
        }
        Action::Navigate {
            conversation_id,
            message_id,
        } => {
            app.search_open = false;
            app.toasts
                .info(format!("Navigating to {message_id} in {conversation_id}"));
            Effect::None
        }
        Action::OpenSettings => {
            app.settings_open = true;
            Effect::None
        }
        Action::CloseSettings => {
            app.settings_open = false;
            Effect::None
        }
        Action::ToggleTheme => {
            app.theme = app.theme.toggle();
            info!("Theme switched to {:?}", app.theme);
            Effect::None
        }
        Action::SetTheme(theme) => {
            if app.theme != theme {
                app.theme = theme;
                info!("Theme set to {:?}", theme);
            }
            Effect::None
        }
        Action::UpdateProfile(profile) => {
            debug!("Profile updated: {:?}", profile);
            app.profile = profile;
            Effect::None
        }
        Action::FileAttached { kind, path } => {
            debug!("Attached {:?} file {}", kind, path.display());
            app.toasts
                .success(format!("File \"{}\" imported successfully", file_name(&path)));
            Effect::None
        }
        Action::AttachFailed(reason) => {
            app.toasts.error(reason);
            Effect::None
        }
        Action::ToolSelected(tool) => {
            app.toasts.info(format!("Tool \"{}\" selected", tool.tag()));
            Effect::None
        }
        Action::RecordingStarted => {
            app.toasts.info("Voice recording started");
            Effect::None
        }
        Action::RecordingStopped => {
            app.toasts.info("Voice recording stopped");
            Effect::None
        }
        Action::CopyMessage(id) => match app.message(&id) {
            Some(message) => Effect::CopyToClipboard(message.content.clone()),
            None => Effect::None,
        },
        Action::Copied => {
            app.toasts.success("Copied to clipboard");
            Effect::None
        }
        Action::CopyFailed(reason) => {
            app.toasts.error(format!("Copy failed: {reason}"));
            Effect::None
        }
        Action::Regenerate(_) => {
            app.toasts.info("Regenerating...");
            Effect::None
        }
        Action::Feedback { kind, .. } => {
            match kind {
                FeedbackKind::Positive => app.toasts.success("Thanks for the positive feedback!"),
                FeedbackKind::Negative => {
                    app.toasts.success("Thanks, we will improve this answer.")
                }
            }
            Effect::None
        }
        Action::Share(_) => {
            app.toasts.info("Sharing is coming soon");
            Effect::None
        }
        Action::SuggestionPicked(_) => {
            // Suggestions are not resubmitted yet.
            app.toasts.info("Feature not implemented yet");
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
