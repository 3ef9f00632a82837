use serde::{Deserialize, Serialize};

/// Who authored a chat turn.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

/// One agent's share of a thinking trace.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Contribution {
    pub agent: String,
    pub response: String,
}

/// Display-only explanation attached to an assistant reply.
///
/// Nothing computes it; the canned reply provider fills in a fixed template.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ThinkingProcess {
    pub analysis: String,
    pub plan: String,
    pub contributions: Vec<Contribution>,
    pub verification: String,
    pub synthesis: String,
}

impl ThinkingProcess {
    /// Numbered `(heading, body)` steps in display order.
    ///
    /// Analysis is step 1, the plan step 2, each contribution follows,
    /// then verification and synthesis close the trace.
    pub fn steps(&self) -> Vec<(String, &str)> {
        let mut steps = Vec::with_capacity(4 + self.contributions.len());
        steps.push(("1. Request analysis".to_string(), self.analysis.as_str()));
        steps.push(("2. Action plan".to_string(), self.plan.as_str()));
        for (idx, contrib) in self.contributions.iter().enumerate() {
            steps.push((
                format!("{}. {} agent contribution", 3 + idx, contrib.agent),
                contrib.response.as_str(),
            ));
        }
        let n = self.contributions.len();
        steps.push((format!("{}. Fact check", 3 + n), self.verification.as_str()));
        steps.push((format!("{}. Final synthesis", 4 + n), self.synthesis.as_str()));
        steps
    }
}

/// A single chat turn. Immutable once appended to the timeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_process: Option<ThinkingProcess>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: new_message_id(),
            role: Role::User,
            content: content.into(),
            thinking_process: None,
            suggestions: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: new_message_id(),
            role: Role::Assistant,
            content: content.into(),
            thinking_process: None,
            suggestions: Vec::new(),
        }
    }
}

/// Generate a new UUID v4 message ID.
pub fn new_message_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Summary row shown in the conversations sidebar.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub date: String,
}

/// Entry of the search corpus behind the command palette.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub content: String,
    pub conversation_id: String,
    pub date: String,
}

/// Tools offered by the input's tool menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Calculator,
    Translator,
    WebSearch,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Calculator, ToolKind::Translator, ToolKind::WebSearch];

    /// Type tag forwarded to the tool handler.
    pub fn tag(self) -> &'static str {
        match self {
            ToolKind::Calculator => "calculator",
            ToolKind::Translator => "translator",
            ToolKind::WebSearch => "search",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Calculator => "🔢 Calculator",
            ToolKind::Translator => "🌐 Translator",
            ToolKind::WebSearch => "🔍 Web search",
        }
    }
}

/// File type hint used by the attach menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Document,
    Any,
}

impl AttachmentKind {
    pub const ALL: [AttachmentKind; 3] =
        [AttachmentKind::Image, AttachmentKind::Document, AttachmentKind::Any];

    pub fn label(self) -> &'static str {
        match self {
            AttachmentKind::Image => "🖼️ Import an image",
            AttachmentKind::Document => "📄 Import a document",
            AttachmentKind::Any => "📎 Attach a file",
        }
    }
}

/// Thumbs up / thumbs down on an assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Positive,
    Negative,
}

/// Per-item affordances of the conversations sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationAction {
    Pin,
    Rename,
    Archive,
    Delete,
}

impl ConversationAction {
    pub fn past_tense(self) -> &'static str {
        match self {
            ConversationAction::Pin => "pinned",
            ConversationAction::Rename => "renamed",
            ConversationAction::Archive => "archived",
            ConversationAction::Delete => "deleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace(contributions: usize) -> ThinkingProcess {
        ThinkingProcess {
            analysis: "a".into(),
            plan: "p".into(),
            contributions: (0..contributions)
                .map(|i| Contribution {
                    agent: format!("Agent{i}"),
                    response: format!("r{i}"),
                })
                .collect(),
            verification: "v".into(),
            synthesis: "s".into(),
        }
    }

    #[test]
    fn steps_number_contributions_after_plan() {
        let trace = sample_trace(2);
        let steps = trace.steps();
        let headings: Vec<&str> = steps.iter().map(|(h, _)| h.as_str()).collect();
        assert_eq!(
            headings,
            vec![
                "1. Request analysis",
                "2. Action plan",
                "3. Agent0 agent contribution",
                "4. Agent1 agent contribution",
                "5. Fact check",
                "6. Final synthesis",
            ]
        );
    }

    #[test]
    fn steps_without_contributions() {
        let trace = sample_trace(0);
        let steps = trace.steps();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[2].0, "3. Fact check");
        assert_eq!(steps[3].1, "s");
    }

    #[test]
    fn message_ids_are_unique() {
        let a = Message::user("hi");
        let b = Message::user("hi");
        assert_ne!(a.id, b.id);
        assert_eq!(a.role, Role::User);
        assert!(a.thinking_process.is_none());
    }

    #[test]
    fn message_serializes_role_lowercase() {
        let msg = Message::assistant("hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));
        assert!(!json.contains("suggestions"));
    }

    #[test]
    fn tool_tags() {
        let tags: Vec<&str> = ToolKind::ALL.iter().map(|t| t.tag()).collect();
        assert_eq!(tags, vec!["calculator", "translator", "search"]);
    }
}
