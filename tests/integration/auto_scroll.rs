// =====
// TESTS: 4
// =====
//
// Auto-scroll integration tests.
// Validates the debounce across streamed updates and real render passes.

use chat_transcript::app::{HostUpdate, apply_host_update};
use chat_transcript::transcript::{TextBlock, TranscriptEntry};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

use crate::helpers::{draw, test_view};

fn long_history() -> Vec<TranscriptEntry> {
    (0..12)
        .map(|i| {
            TranscriptEntry::assistant(format!("t{i}")).with_text(TextBlock::new(format!("m{i}")))
        })
        .collect()
}

#[test]
fn streamed_burst_scrolls_once_after_quiet_period() {
    let (mut view, _rx, _sink) = test_view();
    let quiet = view.config.scroll_quiet_period;
    let start = Instant::now();
    view.set_chat_thread(long_history());
    apply_host_update(&mut view, HostUpdate::BeginResponse { timestamp: "now".into() });

    let mut last = start;
    for i in 0..10u64 {
        last = start + Duration::from_millis(i * 100);
        apply_host_update(&mut view, HostUpdate::AppendBlock(TextBlock::new(format!("part {i}"))));
        draw(&mut view, 50, 12, last);
        assert!(!view.fire_due_scroll(last));
    }

    assert_eq!(view.next_scroll_deadline(), Some(last + quiet));
    assert!(!view.fire_due_scroll(last + quiet - Duration::from_millis(1)));
    assert!(view.fire_due_scroll(last + quiet));
    assert!(!view.has_pending_scroll());
    assert!(view.scroll.target > 0);
}

#[test]
fn animation_frames_do_not_extend_quiet_period() {
    let (mut view, _rx, _sink) = test_view();
    let quiet = view.config.scroll_quiet_period;
    let start = Instant::now();
    apply_host_update(&mut view, HostUpdate::BeginResponse { timestamp: "now".into() });
    apply_host_update(&mut view, HostUpdate::AppendBlock(TextBlock::new("chunk")));
    draw(&mut view, 50, 12, start);

    // Redraws with no property change leave the deadline alone.
    for ms in [16, 32, 48, 400] {
        draw(&mut view, 50, 12, start + Duration::from_millis(ms));
    }
    assert_eq!(view.next_scroll_deadline(), Some(start + quiet));
}

#[test]
fn settled_transcript_requests_no_scroll() {
    let (mut view, _rx, _sink) = test_view();
    view.set_chat_thread(long_history());
    draw(&mut view, 50, 12, Instant::now());
    assert!(!view.has_pending_scroll());
}

#[test]
fn manual_scroll_cancels_pending_auto_scroll() {
    let (mut view, _rx, _sink) = test_view();
    let start = Instant::now();
    view.set_chat_thread(long_history());
    apply_host_update(&mut view, HostUpdate::BeginResponse { timestamp: "now".into() });
    apply_host_update(&mut view, HostUpdate::AppendBlock(TextBlock::new("chunk")));
    draw(&mut view, 50, 12, start);
    assert!(view.has_pending_scroll());

    view.scroll_up(1);
    assert!(!view.has_pending_scroll());
    assert!(!view.fire_due_scroll(start + Duration::from_secs(5)));
}
