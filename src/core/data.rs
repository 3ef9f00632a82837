//! # Data Sources
//!
//! The sidebar and the command palette read their records through the
//! [`DataSource`] trait. [`MockDataSource`] serves the placeholder records
//! shipped with the shell; a real store can replace it without touching
//! any component.

use crate::core::types::{ConversationSummary, SearchResult};

/// Read-only access to conversation summaries and the searchable corpus.
pub trait DataSource: Send + Sync {
    /// Returns the name of the data source (for logging).
    fn name(&self) -> &str;

    /// All conversation summaries, in display order.
    fn conversations(&self) -> Vec<ConversationSummary>;

    /// The corpus the command palette filters over.
    fn search_corpus(&self) -> Vec<SearchResult>;
}

/// Hardcoded placeholder records.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockDataSource;

impl DataSource for MockDataSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn conversations(&self) -> Vec<ConversationSummary> {
        vec![
            ConversationSummary {
                id: "1".into(),
                title: "Discussion about algorithms".into(),
                date: "2 days ago".into(),
            },
            ConversationSummary {
                id: "2".into(),
                title: "Advanced React project".into(),
                date: "1 week ago".into(),
            },
        ]
    }

    fn search_corpus(&self) -> Vec<SearchResult> {
        vec![
            SearchResult {
                id: "1".into(),
                title: "Discussion about algorithms".into(),
                content: "Detailed explanation of merge sort...".into(),
                conversation_id: "conv1".into(),
                date: "2 days ago".into(),
            },
            SearchResult {
                id: "2".into(),
                title: "React project".into(),
                content: "How to optimize performance...".into(),
                conversation_id: "conv2".into(),
                date: "1 week ago".into(),
            },
        ]
    }
}

/// Case-insensitive substring filter over title or content.
///
/// An empty query yields no results. Matches keep corpus order.
pub fn filter_results(corpus: &[SearchResult], query: &str) -> Vec<SearchResult> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    corpus
        .iter()
        .filter(|r| {
            r.title.to_lowercase().contains(&needle) || r.content.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
