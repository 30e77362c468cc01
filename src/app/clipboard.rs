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

use crate::transcript::TranscriptEntry;

/// Destination for copied text. The system clipboard in production, a
/// recording sink in tests.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// Acquires the platform clipboard per write and releases it right after.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_owned())?;
        Ok(())
    }
}

/// Whether the latest response was copied. Stays set until the host resets it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyState {
    is_response_copied: bool,
}

impl CopyState {
    #[must_use]
    pub fn is_response_copied(self) -> bool {
        self.is_response_copied
    }

    pub fn reset(&mut self) {
        self.is_response_copied = false;
    }
}

/// Copy the last text block of the last entry.
///
/// Returns `false` without touching `state` when there is nothing to copy.
/// A clipboard rejection is logged and otherwise ignored: the write was
/// issued, so the flag still flips.
pub fn copy_last_response(
    chat_thread: &[TranscriptEntry],
    sink: &mut dyn ClipboardSink,
    state: &mut CopyState,
) -> bool {
    let Some(text) = chat_thread.last().and_then(TranscriptEntry::last_text) else {
        tracing::debug!("copy requested with no response text; skipped");
        return false;
    };
    if let Err(err) = sink.set_text(text) {
        tracing::debug!(error = %err, "clipboard rejected response copy");
    }
    state.is_response_copied = true;
    true
}
