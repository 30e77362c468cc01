use chat_transcript::app::{ClipboardSink, TranscriptEvent, TranscriptView};
use chat_transcript::config::TranscriptConfig;
use chat_transcript::ui;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Clipboard double that records every write. Clones share the log.
#[derive(Clone, Default)]
pub struct RecordingClipboard {
    pub writes: Rc<RefCell<Vec<String>>>,
}

impl RecordingClipboard {
    pub fn last(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.writes.borrow_mut().push(text.to_owned());
        Ok(())
    }
}

/// Build a view with a recording clipboard and a live listener.
/// No terminal, no host -- just state.
pub fn test_view() -> (TranscriptView, mpsc::UnboundedReceiver<TranscriptEvent>, RecordingClipboard)
{
    let sink = RecordingClipboard::default();
    let (view, rx) = TranscriptView::detached(TranscriptConfig::default(), Box::new(sink.clone()));
    (view, rx, sink)
}

/// Draw one frame into an in-memory backend and return the buffer rows.
pub fn draw(view: &mut TranscriptView, width: u16, height: u16, now: Instant) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test backend");
    terminal.draw(|f| ui::render(f, view, None, now)).expect("draw");
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_owned())
                .collect::<String>()
                .trim_end()
                .to_owned()
        })
        .collect()
}
