use std::sync::Arc;
use std::time::{Duration, Instant};

use orion::core::action::{Action, Effect, update};
use orion::core::config::ResolvedConfig;
use orion::core::data::{DataSource, MockDataSource, filter_results};
use orion::core::recording::{PLACEHOLDER_TRANSCRIPT, Recorder, format_elapsed};
use orion::core::reply::{CannedReplyProvider, ReplyProvider};
use orion::core::state::App;
use orion::core::types::Role;

// ============================================================================
// Helper Functions
// ============================================================================

fn new_app() -> App {
    App::new(
        Arc::new(MockDataSource),
        Arc::new(CannedReplyProvider::default()),
        &ResolvedConfig::default(),
    )
}

/// Run the reply the event loop would spawn for `effect`, then feed it back.
async fn deliver_reply(app: &mut App, effect: Effect) {
    let Effect::SpawnReply { prompt, generation } = effect else {
        panic!("expected SpawnReply, got {effect:?}");
    };
    let message = app.replies.reply(&prompt).await.unwrap();
    update(app, Action::ReplyReady { generation, message });
}

// ============================================================================
// Sending
// ============================================================================

#[test]
fn blank_send_leaves_timeline_unchanged() {
    let mut app = new_app();
    for text in ["", " ", "\t\n  "] {
        assert_eq!(update(&mut app, Action::Submit(text.into())), Effect::None);
    }
    assert!(app.messages.is_empty());
}

#[tokio::test]
async fn send_grows_timeline_by_two() {
    let mut app = new_app();
    let effect = update(&mut app, Action::Submit("X".into()));

    assert_eq!(app.messages.len(), 1);
    assert_eq!(app.messages[0].role, Role::User);
    assert_eq!(app.messages[0].content, "X");
    assert!(app.is_waiting());

    deliver_reply(&mut app, effect).await;

    assert_eq!(app.messages.len(), 2);
    let reply = &app.messages[1];
    assert_eq!(reply.role, Role::Assistant);
    assert!(reply.content.contains("\"X\""));
    assert!(reply.thinking_process.is_some());
    assert_eq!(reply.suggestions.len(), 3);
    assert!(!app.is_waiting());
}

#[tokio::test]
async fn reply_from_previous_conversation_is_discarded() {
    let mut app = new_app();
    let effect = update(&mut app, Action::Submit("first".into()));
    assert_eq!(update(&mut app, Action::NewConversation), Effect::CancelReplies);

    deliver_reply(&mut app, effect).await;
    assert!(app.messages.is_empty());
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn palette_filtering() {
    let corpus = MockDataSource.search_corpus();

    assert!(filter_results(&corpus, "").is_empty());
    assert!(filter_results(&corpus, "zzz").is_empty());

    let react = filter_results(&corpus, "react");
    assert_eq!(react.len(), 1);
    assert_eq!(react[0].title, "React project");

    // Content matches count too, case-insensitively
    let sort = filter_results(&corpus, "MERGE SORT");
    assert_eq!(sort.len(), 1);
    assert_eq!(sort[0].conversation_id, "conv1");
}

// ============================================================================
// Theme & recording
// ============================================================================

#[test]
fn theme_toggle_twice_restores_original() {
    let mut app = new_app();
    let original = app.theme;
    update(&mut app, Action::ToggleTheme);
    assert_ne!(app.theme, original);
    update(&mut app, Action::ToggleTheme);
    assert_eq!(app.theme, original);
}

#[test]
fn recorder_counts_seconds_until_stopped() {
    let start = Instant::now();
    let mut recorder = Recorder::new();
    recorder.start(start);
    assert_eq!(recorder.elapsed_secs(), 0);

    assert!(!recorder.tick(start + Duration::from_millis(900)));
    assert!(recorder.tick(start + Duration::from_secs(1)));
    assert!(recorder.tick(start + Duration::from_secs(2)));
    assert_eq!(format_elapsed(recorder.elapsed_secs()), "0:02");

    assert_eq!(recorder.stop(), Some(PLACEHOLDER_TRANSCRIPT));
    assert_eq!(recorder.elapsed_secs(), 0);
    assert!(!recorder.tick(start + Duration::from_secs(10)));
    assert_eq!(recorder.elapsed_secs(), 0);
}
