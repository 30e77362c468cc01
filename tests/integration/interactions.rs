// =====
// TESTS: 8
// =====
//
// Interaction integration tests.
// Validates gesture dispatch, notification payloads and host reactions.

use chat_transcript::app::{
    ClickTarget, Gesture, Host, TranscriptEvent, handle_terminal_event, handle_transcript_event,
};
use chat_transcript::transcript::{ActionButtonSpec, Citation, TextBlock, TranscriptEntry};
use chat_transcript::transcript::default_action_buttons;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::{Duration, Instant};

use crate::helpers::{draw, test_view};

fn reply() -> TranscriptEntry {
    TranscriptEntry::assistant("t2")
        .with_text(TextBlock::new("Hello!"))
        .with_citations(vec![Citation::new(json!({"id": "c1", "label": "doc"}))])
        .with_followups(vec!["And then?".to_owned()])
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn action_button_notification_carries_id_and_entry() {
    let (mut view, mut rx, _sink) = test_view();
    view.set_chat_thread(vec![TranscriptEntry::user("Hi", "t1"), reply()]);
    view.set_action_buttons(vec![ActionButtonSpec::new("like", "Like", "\u{2661}")]);

    let mut gesture = Gesture::mouse();
    view.activate(ClickTarget::ActionButton { entry: 1, button: 0 }, &mut gesture);
    assert!(gesture.is_default_prevented());

    let event = rx.try_recv().expect("notification");
    let payload = serde_json::to_value(&event).expect("serializable");
    assert_eq!(payload["event"], json!("on-action-button-click"));
    assert_eq!(payload["detail"]["id"], json!("like"));
    assert_eq!(payload["detail"]["chatThreadEntry"]["timestamp"], json!("t2"));
    assert_eq!(payload["detail"]["chatThreadEntry"]["isUserMessage"], json!(false));
}

#[test]
fn narrow_terminal_mouse_click_copies_from_wrapped_action_row() {
    let (mut view, _rx, sink) = test_view();
    view.set_chat_thread(vec![TranscriptEntry::assistant("t").with_text(TextBlock::new("Hello!"))]);
    view.set_action_buttons(default_action_buttons());
    let rows = draw(&mut view, 30, 12, Instant::now());

    let row = rows.iter().position(|r| r.contains("Copy response")).expect("copy button drawn");
    let col = rows[row].chars().position(|c| c == 'C').expect("copy label");
    handle_terminal_event(
        &mut view,
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: u16::try_from(col).expect("fits"),
            row: u16::try_from(row).expect("fits"),
            modifiers: KeyModifiers::NONE,
        }),
    );

    assert!(view.selection.is_none());
    assert!(view.is_response_copied());
    assert_eq!(sink.last().as_deref(), Some("Hello!"));
}

#[test]
fn disabled_action_button_stays_silent() {
    let (mut view, mut rx, _sink) = test_view();
    view.set_chat_thread(vec![reply()]);
    view.set_action_buttons(vec![ActionButtonSpec::new("like", "Like", "").disabled(true)]);
    draw(&mut view, 60, 20, Instant::now());

    let target = ClickTarget::ActionButton { entry: 0, button: 0 };
    let row = view.hits.row_of(target).expect("button laid out");
    let region = view.hits.regions().iter().find(|r| r.target == target).cloned();
    let col = region.expect("region").cols.start;
    let gesture = view.click_at(row, col, Gesture::mouse());

    assert!(gesture.is_default_prevented());
    assert!(rx.try_recv().is_err());
}

#[test]
fn citation_click_passes_payload_through() {
    let (mut view, mut rx, _sink) = test_view();
    view.set_chat_thread(vec![reply()]);

    let mut gesture = Gesture::mouse();
    view.activate(ClickTarget::Citation { entry: 0, citation: 0 }, &mut gesture);

    let payload = serde_json::to_value(rx.try_recv().expect("notification")).expect("json");
    assert_eq!(
        payload,
        json!({
            "event": "on-citation-click",
            "detail": {"index": 0, "citation": {"id": "c1", "label": "doc"}}
        })
    );
}

#[test]
fn keyboard_activation_reaches_followup() {
    let (mut view, mut rx, _sink) = test_view();
    view.set_chat_thread(vec![reply()]);
    draw(&mut view, 60, 20, Instant::now());

    // Copy button, citation, follow-up.
    for _ in 0..3 {
        handle_terminal_event(&mut view, key(KeyCode::Tab));
    }
    assert_eq!(view.focused, Some(ClickTarget::Followup { entry: 0, question: 0 }));
    handle_terminal_event(&mut view, key(KeyCode::Enter));

    assert_eq!(
        rx.try_recv().expect("notification"),
        TranscriptEvent::FollowupClick { question: "And then?".to_owned() }
    );
}

#[test]
fn global_disable_blocks_copy() {
    let (mut view, _rx, sink) = test_view();
    view.set_chat_thread(vec![reply()]);
    view.set_disabled(true);

    let mut gesture = Gesture::keyboard();
    view.activate(ClickTarget::CopyResponse { entry: 0 }, &mut gesture);

    assert!(sink.writes.borrow().is_empty());
    assert!(!view.is_response_copied());
}

#[test]
fn copy_on_empty_transcript_is_noop() {
    let (mut view, _rx, sink) = test_view();
    assert!(!view.copy_response());
    assert!(sink.writes.borrow().is_empty());
    assert!(!view.is_response_copied());
}

#[tokio::test]
async fn followup_notification_starts_a_new_turn() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let (mut view, rx, _sink) = test_view();
            view.set_chat_thread(vec![reply()]);
            let mut host = Host::new(rx, Duration::from_millis(1));

            let mut gesture = Gesture::mouse();
            view.activate(ClickTarget::Followup { entry: 0, question: 0 }, &mut gesture);
            let event = host.events_rx.recv().await.expect("notification");
            handle_transcript_event(&mut view, &mut host, event);

            let last = view.chat_thread().last().expect("new turn");
            assert!(last.is_user_message);
            assert_eq!(last.last_text(), Some("And then?"));
            assert_eq!(host.last_event.as_deref(), Some("follow-up: And then?"));
        })
        .await;
}
