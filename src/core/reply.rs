//! # Reply Providers
//!
//! Produces the assistant's answer to a user prompt. The shell ships with
//! [`CannedReplyProvider`], which echoes the prompt inside a fixed template.
//! The reply delay is owned by the event loop, not the provider.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::{Contribution, Message, ThinkingProcess};

/// Errors a reply provider may report.
///
/// The canned provider never fails; the variants exist for backends that can.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// Backend not reachable or not configured.
    #[error("reply provider unavailable: {0}")]
    Unavailable(String),
    /// Backend answered with something unusable.
    #[error("invalid reply: {0}")]
    Invalid(String),
}

#[async_trait]
pub trait ReplyProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Builds the assistant message answering `prompt`.
    async fn reply(&self, prompt: &str) -> Result<Message, ReplyError>;
}

/// Fixed follow-up suggestions attached to every canned reply.
pub const CANNED_SUGGESTIONS: [&str; 3] = [
    "Can you go deeper on this point?",
    "Give me a concrete example",
    "What are the alternatives?",
];

/// Canned reply template.
pub struct CannedReplyProvider {
    assistant_name: String,
}

impl CannedReplyProvider {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
        }
    }

    fn content(&self, prompt: &str) -> String {
        format!(
            "That's an excellent question! Here is my detailed answer regarding: \"{prompt}\".\n\n\
             I will explain this in a clear and structured way. This answer combines several \
             perspectives to give you a complete picture.\n\n\
             In a real system, {} would analyze your request in depth and mobilize the \
             appropriate agents to give you the best possible answer.",
            self.assistant_name
        )
    }

    fn thinking_process() -> ThinkingProcess {
        ThinkingProcess {
            analysis: "I identified a request that needs a detailed, contextual explanation."
                .into(),
            plan: "I will consult the Logic agent for structure, then the Creative agent to enrich the answer."
                .into(),
            contributions: vec![
                Contribution {
                    agent: "Logic".into(),
                    response: "Structured the answer into key points with concrete examples."
                        .into(),
                },
                Contribution {
                    agent: "Creative".into(),
                    response: "Added analogies and examples to improve understanding.".into(),
                },
            ],
            verification:
                "The Verifier agent confirmed the information is consistent with the knowledge base."
                    .into(),
            synthesis: "I am now assembling these elements into a clear and complete answer."
                .into(),
        }
    }
}

impl Default for CannedReplyProvider {
    fn default() -> Self {
        Self::new("ORION")
    }
}

#[async_trait]
impl ReplyProvider for CannedReplyProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn reply(&self, prompt: &str) -> Result<Message, ReplyError> {
        let mut message = Message::assistant(self.content(prompt));
        message.thinking_process = Some(Self::thinking_process());
        message.suggestions = CANNED_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
        Ok(message)
    }
}
