// chat_transcript — A terminal chat transcript view
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

mod clipboard;
mod dispatch;
mod events;
mod hits;
mod scroll;
mod selection;
mod state;
pub mod stream;

// Re-export all public types so `crate::app::TranscriptView`, `crate::app::TranscriptEvent`, etc. work.
pub use clipboard::{ClipboardSink, CopyState, SystemClipboard, copy_last_response};
pub use dispatch::{
    EventEmitter, Gesture, GestureSource, TranscriptEvent, dispatch_action_button,
    dispatch_citation, dispatch_followup,
};
pub use events::handle_terminal_event;
pub use hits::{ClickTarget, HitMap, HitRegion};
pub use scroll::{AutoScrollScheduler, PendingScroll, ScrollState, ScrollTarget};
pub(crate) use selection::normalize_selection;
pub use state::{SelectionPoint, SelectionState, TranscriptView};
pub use stream::{HostUpdate, apply_host_update};

use crate::error::AppError;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{FutureExt as _, Stream, StreamExt};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Host-side wiring for [`run_tui`]: where conversation updates come from
/// and where transcript notifications go.
pub struct Host {
    pub updates_tx: mpsc::UnboundedSender<HostUpdate>,
    pub updates_rx: mpsc::UnboundedReceiver<HostUpdate>,
    pub events_rx: mpsc::UnboundedReceiver<TranscriptEvent>,
    /// Delay between streamed updates of a simulated reply.
    pub stream_interval: Duration,
    /// Most recent notification, shown in the status line.
    pub last_event: Option<String>,
    active_stream: Option<tokio::task::JoinHandle<()>>,
}

impl Host {
    pub fn new(
        events_rx: mpsc::UnboundedReceiver<TranscriptEvent>,
        stream_interval: Duration,
    ) -> Self {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        Self {
            updates_tx,
            updates_rx,
            events_rx,
            stream_interval,
            last_event: None,
            active_stream: None,
        }
    }

    /// Stream a canned reply to `prompt`. Ignored while another reply is streaming.
    pub fn start_reply(&mut self, prompt: &str) {
        if self.active_stream.as_ref().is_some_and(|h| !h.is_finished()) {
            tracing::debug!("reply already streaming; new prompt ignored");
            return;
        }
        let updates = stream::scripted_reply(prompt);
        self.active_stream = Some(stream::spawn_scripted_stream(
            self.updates_tx.clone(),
            updates,
            self.stream_interval,
        ));
    }

    /// Abort the streaming reply, if any. Returns whether one was running.
    pub fn cancel_reply(&mut self) -> bool {
        match self.active_stream.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }
}

/// React to a transcript notification the way a chat frontend would. The
/// transcript itself never does any of this.
pub fn handle_transcript_event(
    view: &mut TranscriptView,
    host: &mut Host,
    event: TranscriptEvent,
) {
    match serde_json::to_string(&event) {
        Ok(json) => tracing::info!(event = event.name(), payload = %json, "transcript event"),
        Err(err) => tracing::info!(event = event.name(), error = %err, "transcript event"),
    }
    host.last_event = Some(match &event {
        TranscriptEvent::ActionButtonClick { id, .. } => format!("action: {id}"),
        TranscriptEvent::FollowupClick { question } => format!("follow-up: {question}"),
        TranscriptEvent::CitationClick(click) => {
            format!("citation [{}]: {}", click.index + 1, click.citation.label())
        }
    });

    match event {
        TranscriptEvent::FollowupClick { question } => {
            if view.is_processing_response() {
                return;
            }
            apply_host_update(
                view,
                HostUpdate::UserMessage(crate::transcript::TranscriptEntry::user(
                    question.clone(),
                    stream::clock_timestamp(),
                )),
            );
            host.start_reply(&question);
        }
        TranscriptEvent::ActionButtonClick { id, chat_thread_entry } if id == "regenerate" => {
            if view.is_processing_response() {
                return;
            }
            let prompt = view
                .chat_thread()
                .iter()
                .rev()
                .find(|e| e.is_user_message)
                .and_then(|e| e.last_text().map(str::to_owned))
                .unwrap_or_else(|| chat_thread_entry.last_text().unwrap_or_default().to_owned());
            host.start_reply(&prompt);
        }
        _ => {}
    }
}

fn is_cancel_key(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent { code: KeyCode::Char('x'), kind: KeyEventKind::Press, modifiers, .. })
            if !modifiers.contains(KeyModifiers::CONTROL)
    )
}

fn handle_event(view: &mut TranscriptView, host: &mut Host, event: Event) {
    if is_cancel_key(&event) {
        if host.cancel_reply() {
            apply_host_update(view, HostUpdate::FailResponse {
                message: "Response cancelled.".to_owned(),
            });
        }
        return;
    }
    handle_terminal_event(view, event);
}

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(view: &mut TranscriptView, host: &mut Host) -> anyhow::Result<()> {
    let mut terminal = ratatui::try_init().map_err(|e| AppError::Terminal(e.to_string()))?;

    // Mouse capture for clickable controls (ignore error on unsupported terminals)
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);

    let result = run_loop(&mut terminal, EventStream::new(), view, host).await;

    // --- Graceful shutdown, also after a failed draw ---
    host.cancel_reply();
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();

    result
}

/// Event/render loop. Returns on quit or on the first draw error; terminal
/// setup and teardown stay with the caller.
async fn run_loop<B, S>(
    terminal: &mut Terminal<B>,
    mut events: S,
    view: &mut TranscriptView,
    host: &mut Host,
) -> anyhow::Result<()>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
    S: Stream<Item = std::io::Result<Event>> + Unpin,
{
    let tick_duration = Duration::from_millis(16);
    let mut last_render = Instant::now();

    loop {
        // Phase 1: wait for an event, the next frame tick, or the scroll deadline
        let mut wake = last_render + tick_duration;
        if let Some(deadline) = view.next_scroll_deadline() {
            wake = wake.min(deadline);
        }
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                handle_event(view, host, event);
            }
            Some(update) = host.updates_rx.recv() => {
                apply_host_update(view, update);
            }
            Some(event) = host.events_rx.recv() => {
                handle_transcript_event(view, host, event);
            }
            () = tokio::time::sleep_until(wake.into()) => {}
        }

        // Phase 2: drain all remaining queued events (non-blocking)
        loop {
            // Try terminal events first (keeps input responsive)
            if let Some(Some(Ok(event))) = events.next().now_or_never() {
                handle_event(view, host, event);
                continue;
            }
            if let Ok(update) = host.updates_rx.try_recv() {
                apply_host_update(view, update);
                continue;
            }
            match host.events_rx.try_recv() {
                Ok(event) => handle_transcript_event(view, host, event),
                Err(_) => break,
            }
        }

        if view.should_quit {
            return Ok(());
        }

        // Phase 3: fire a due auto-scroll, then render once
        let now = Instant::now();
        view.fire_due_scroll(now);
        let status = host.last_event.clone();
        terminal.draw(|f| crate::ui::render(f, view, status.as_deref(), now))?;
        last_render = Instant::now();
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{TextBlock, TranscriptEntry};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn followup_event_appends_user_turn_and_streams_reply() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let (mut view, rx, _sink) = tests_support::recording_view();
                let mut host = Host::new(rx, Duration::from_millis(1));
                view.push_entry(TranscriptEntry::assistant("t").with_text(TextBlock::new("a")));

                handle_transcript_event(
                    &mut view,
                    &mut host,
                    TranscriptEvent::FollowupClick { question: "Why?".into() },
                );
                assert_eq!(view.chat_thread().len(), 2);
                assert!(view.chat_thread()[1].is_user_message);

                let first = host.updates_rx.recv().await.unwrap();
                assert!(matches!(first, HostUpdate::BeginResponse { .. }));
                assert_eq!(host.last_event.as_deref(), Some("follow-up: Why?"));
            })
            .await;
    }

    #[tokio::test]
    async fn cancel_key_aborts_stream_and_marks_error() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let (mut view, rx, _sink) = tests_support::recording_view();
                let mut host = Host::new(rx, Duration::from_secs(60));
                apply_host_update(&mut view, HostUpdate::BeginResponse { timestamp: "t".into() });
                host.start_reply("q");

                handle_event(&mut view, &mut host, key(KeyCode::Char('x')));

                assert!(!view.is_processing_response());
                let error = view.chat_thread().last().and_then(|e| e.error.clone());
                assert_eq!(error.map(|e| e.message).as_deref(), Some("Response cancelled."));
            })
            .await;
    }

    #[tokio::test]
    async fn loop_draws_frames_until_quit_key() {
        let (mut view, rx, _sink) = tests_support::recording_view();
        let mut host = Host::new(rx, Duration::from_millis(1));
        view.push_entry(TranscriptEntry::assistant("t").with_text(TextBlock::new("Hello!")));
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(40, 10)).unwrap();
        let quit_later = futures::stream::once(async {
            tokio::time::sleep(Duration::from_millis(60)).await;
            Ok::<_, std::io::Error>(key(KeyCode::Char('q')))
        })
        .boxed_local();

        run_loop(&mut terminal, quit_later, &mut view, &mut host).await.unwrap();

        assert!(view.should_quit);
        assert!(view.rendered_lines.iter().any(|l| l.contains("Hello!")));
    }

    #[test]
    fn cancel_key_without_stream_is_noop() {
        let (mut view, rx, _sink) = tests_support::recording_view();
        let mut host = Host::new(rx, Duration::from_millis(1));
        handle_event(&mut view, &mut host, key(KeyCode::Char('x')));
        assert!(view.chat_thread().is_empty());
    }
}
