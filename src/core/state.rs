//! # Application State
//!
//! Core business state for ORION. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── data: Arc<dyn DataSource>          // conversations + search corpus
//! ├── replies: Arc<dyn ReplyProvider>    // assistant replies
//! ├── messages: Vec<Message>             // append-only timeline
//! ├── conversations: Vec<Summary>        // sidebar rows
//! ├── current_conversation_id            // highlighted sidebar row
//! ├── sidebar/search/settings_open       // panel visibility
//! ├── theme: Theme                       // light / dark
//! ├── toasts: ToastQueue                 // transient notifications
//! ├── profile: Profile                   // display name, tone
//! ├── reply_delay: Duration              // simulated thinking time
//! ├── generation: u64                    // bumped on reset
//! └── pending_replies: usize             // replies in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;
use std::time::Duration;

use crate::core::config::{Profile, ResolvedConfig};
use crate::core::data::DataSource;
use crate::core::reply::ReplyProvider;
use crate::core::theme::Theme;
use crate::core::toast::ToastQueue;
use crate::core::types::{ConversationSummary, Message, SearchResult};

pub struct App {
    pub data: Arc<dyn DataSource>,
    pub replies: Arc<dyn ReplyProvider>,
    pub messages: Vec<Message>,
    pub conversations: Vec<ConversationSummary>,
    pub current_conversation_id: Option<String>,
    pub sidebar_open: bool,
    pub search_open: bool,
    pub settings_open: bool,
    pub theme: Theme,
    pub toasts: ToastQueue,
    pub assistant_name: String,
    pub profile: Profile,
    pub reply_delay: Duration,
    /// Bumped whenever the timeline is reset. Replies tagged with an older
    /// generation are discarded on arrival.
    pub generation: u64,
    pub pending_replies: usize,
}

impl App {
    pub fn new(
        data: Arc<dyn DataSource>,
        replies: Arc<dyn ReplyProvider>,
        config: &ResolvedConfig,
    ) -> Self {
        let conversations = data.conversations();
        let current_conversation_id = conversations.first().map(|c| c.id.clone());
        log::info!(
            "App created (data: {}, replies: {}, {} conversations)",
            data.name(),
            replies.name(),
            conversations.len()
        );
        Self {
            data,
            replies,
            messages: Vec::new(),
            conversations,
            current_conversation_id,
            sidebar_open: false,
            search_open: false,
            settings_open: false,
            theme: config.theme,
            toasts: ToastQueue::new(config.toast_duration),
            assistant_name: config.assistant_name.clone(),
            profile: config.profile.clone(),
            reply_delay: config.reply_delay,
            generation: 0,
            pending_replies: 0,
        }
    }

    /// True while at least one simulated reply is in flight.
    pub fn is_waiting(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn search_corpus(&self) -> Vec<SearchResult> {
        self.data.search_corpus()
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// True if any overlay covers the chat screen.
    pub fn overlay_open(&self) -> bool {
        self.sidebar_open || self.search_open || self.settings_open
    }
}
