// =====
// TESTS: 5
// =====
//
// Projection integration tests.
// Validates the rendered tree for host-shaped JSON transcripts.

use chat_transcript::app::{ClickTarget, Gesture};
use chat_transcript::transcript::{ActionButtonSpec, TranscriptEntry};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Instant;

use crate::helpers::{draw, test_view};

fn host_transcript() -> Vec<TranscriptEntry> {
    serde_json::from_value(json!([
        {"isUserMessage": true, "text": [{"value": "Hi"}], "timestamp": "t1"},
        {
            "isUserMessage": false,
            "text": [{"value": "Hello!"}],
            "citations": [{"id": "c1"}],
            "timestamp": "t2"
        }
    ]))
    .expect("valid transcript json")
}

// --- End-to-end ---

#[test]
fn two_turn_transcript_renders_and_copies_reply() {
    let (mut view, _rx, sink) = test_view();
    view.set_chat_thread(host_transcript());
    view.set_action_buttons(Vec::new());

    let tree = view.project();
    assert_eq!(tree.items.len(), 2);
    let reply = &tree.items[1];
    let citations = reply.citations.as_ref().expect("citation region");
    assert_eq!(citations.citations.len(), 1);
    assert_eq!(citations.citations[0].payload(), &json!({"id": "c1"}));
    assert_eq!(reply.footer.author, view.config.bot_label);

    draw(&mut view, 60, 20, Instant::now());
    let copy = ClickTarget::CopyResponse { entry: 1 };
    let row = view.hits.row_of(copy).expect("copy button laid out");
    let col = view.hits.regions().iter().find(|r| r.target == copy).map(|r| r.cols.start);
    let gesture = view.click_at(row, col.expect("copy columns"), Gesture::mouse());

    assert!(gesture.is_default_prevented());
    assert_eq!(sink.last().as_deref(), Some("Hello!"));
    assert!(view.is_response_copied());
}

#[test]
fn copied_state_shows_in_next_frame() {
    let (mut view, _rx, _sink) = test_view();
    view.set_chat_thread(host_transcript());
    draw(&mut view, 60, 20, Instant::now());
    assert!(view.copy_response());

    let rows = draw(&mut view, 60, 20, Instant::now());
    assert!(rows.iter().any(|r| r.contains("Copied")));
    assert!(!rows.iter().any(|r| r.contains("Copy response")));
}

// --- User entries ---

#[test]
fn user_entries_never_render_reply_chrome() {
    let (mut view, _rx, _sink) = test_view();
    let user: TranscriptEntry = serde_json::from_value(json!({
        "isUserMessage": true,
        "text": [{"value": "Question"}],
        "citations": [{"id": "x"}],
        "followupQuestions": ["Should not show"],
        "timestamp": "t"
    }))
    .expect("valid entry");
    view.set_chat_thread(vec![user]);
    view.set_action_buttons(vec![ActionButtonSpec::new("like", "Like", "\u{2661}")]);

    let tree = view.project();
    let node = &tree.items[0];
    assert!(node.actions.is_none());
    assert!(node.citations.is_none());
    assert!(node.followups.is_none());
    assert_eq!(node.footer.author, "You");

    let rows = draw(&mut view, 60, 12, Instant::now());
    assert!(!rows.iter().any(|r| r.contains("Should not show") || r.contains("Like")));
}

// --- Purity ---

#[test]
fn projection_is_idempotent() {
    let (mut view, _rx, _sink) = test_view();
    view.set_chat_thread(host_transcript());
    view.set_action_buttons(vec![ActionButtonSpec::new("regenerate", "Regenerate", "\u{21bb}")]);
    assert_eq!(view.project(), view.project());
}

#[test]
fn empty_transcript_projects_nothing() {
    let (mut view, _rx, _sink) = test_view();
    let tree = view.project();
    assert!(tree.items.is_empty());
    assert_eq!(tree.scroll_requests, 0);

    let rows = draw(&mut view, 40, 8, Instant::now());
    assert!(rows.iter().any(|r| r.contains("No messages yet.")));
}
