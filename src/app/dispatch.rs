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

//! Gesture → outward notification mapping.
//!
//! Nothing here performs the action a button stands for. The view only
//! reports what was clicked; the host decides what "regenerate" means.

use crate::transcript::{ActionButtonSpec, TranscriptEntry};
use crate::ui::CitationClick;
use serde::Serialize;
use tokio::sync::mpsc;

/// Notification emitted to whoever listens on the host side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "detail")]
pub enum TranscriptEvent {
    #[serde(rename = "on-action-button-click", rename_all = "camelCase")]
    ActionButtonClick { id: String, chat_thread_entry: TranscriptEntry },
    #[serde(rename = "on-followup-click")]
    FollowupClick { question: String },
    /// Re-emitted unchanged from the citation list.
    #[serde(rename = "on-citation-click")]
    CitationClick(CitationClick),
}

impl TranscriptEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ActionButtonClick { .. } => "on-action-button-click",
            Self::FollowupClick { .. } => "on-followup-click",
            Self::CitationClick(_) => "on-citation-click",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureSource {
    Mouse,
    Keyboard,
}

/// A user gesture in flight. Dispatch marks it handled so the caller skips
/// the gesture's default behavior (starting a text selection on click).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    pub source: GestureSource,
    default_prevented: bool,
}

impl Gesture {
    #[must_use]
    pub const fn mouse() -> Self {
        Self { source: GestureSource::Mouse, default_prevented: false }
    }

    #[must_use]
    pub const fn keyboard() -> Self {
        Self { source: GestureSource::Keyboard, default_prevented: false }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Sending half of the notification channel. Cloning it adds another emitter,
/// not another listener.
#[derive(Debug, Clone)]
pub struct EventEmitter {
    tx: mpsc::UnboundedSender<TranscriptEvent>,
}

impl EventEmitter {
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TranscriptEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: TranscriptEvent) {
        let name = event.name();
        if self.tx.send(event).is_err() {
            tracing::debug!(event = name, "no listener for transcript event; dropped");
        }
    }
}

pub fn dispatch_action_button(
    emitter: &EventEmitter,
    gesture: &mut Gesture,
    button: &ActionButtonSpec,
    entry: &TranscriptEntry,
) {
    gesture.prevent_default();
    emitter.emit(TranscriptEvent::ActionButtonClick {
        id: button.id.clone(),
        chat_thread_entry: entry.clone(),
    });
}

/// Pass-through: the sub-widget's payload goes out untouched.
pub fn dispatch_citation(emitter: &EventEmitter, click: CitationClick) {
    emitter.emit(TranscriptEvent::CitationClick(click));
}

pub fn dispatch_followup(emitter: &EventEmitter, gesture: &mut Gesture, question: &str) {
    gesture.prevent_default();
    emitter.emit(TranscriptEvent::FollowupClick { question: question.to_owned() });
}
