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

use super::clipboard::{ClipboardSink, CopyState, SystemClipboard, copy_last_response};
use super::dispatch::{
    EventEmitter, Gesture, TranscriptEvent, dispatch_action_button, dispatch_citation,
    dispatch_followup,
};
use super::hits::{ClickTarget, HitMap};
use super::scroll::{AutoScrollScheduler, ScrollState, ScrollTarget};
use crate::config::TranscriptConfig;
use crate::transcript::{ActionButtonSpec, TextBlock, TranscriptEntry};
use crate::ui::citations::CitationList;
use crate::ui::transcript::{ProjectionInput, TranscriptTree, project};
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPoint {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    pub start: SelectionPoint,
    pub end: SelectionPoint,
    pub dragging: bool,
}

/// The transcript component: host-supplied properties plus the UI state it
/// owns exclusively (copy flag, pending scroll, scroll position, hit map).
pub struct TranscriptView {
    chat_thread: Vec<TranscriptEntry>,
    action_buttons: Vec<ActionButtonSpec>,
    is_disabled: bool,
    is_processing_response: bool,
    pub config: TranscriptConfig,
    copy_state: CopyState,
    scheduler: AutoScrollScheduler<ScrollTarget>,
    /// Bumped on every property change; a render pass that sees a new
    /// revision counts as a re-render and may request auto-scroll.
    revision: u64,
    rendered_revision: Option<u64>,
    pub scroll: ScrollState,
    /// Rebuilt by every layout pass.
    pub hits: HitMap,
    /// Last content row, present once a non-empty transcript was laid out.
    pub sentinel_row: Option<usize>,
    pub focused: Option<ClickTarget>,
    pub selection: Option<SelectionState>,
    /// Area where the transcript was last drawn (for mouse mapping).
    pub rendered_area: ratatui::layout::Rect,
    /// Plain text of the visible rows, for selection copy.
    pub rendered_lines: Vec<String>,
    pub should_quit: bool,
    emitter: EventEmitter,
    clipboard: Box<dyn ClipboardSink>,
}

impl TranscriptView {
    pub fn new(config: TranscriptConfig, emitter: EventEmitter) -> Self {
        Self::with_clipboard(config, emitter, Box::new(SystemClipboard))
    }

    pub fn with_clipboard(
        config: TranscriptConfig,
        emitter: EventEmitter,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let scheduler = AutoScrollScheduler::new(config.scroll_quiet_period);
        Self {
            chat_thread: Vec::new(),
            action_buttons: Vec::new(),
            is_disabled: false,
            is_processing_response: false,
            config,
            copy_state: CopyState::default(),
            scheduler,
            revision: 0,
            rendered_revision: None,
            scroll: ScrollState::default(),
            hits: HitMap::default(),
            sentinel_row: None,
            focused: None,
            selection: None,
            rendered_area: ratatui::layout::Rect::default(),
            rendered_lines: Vec::new(),
            should_quit: false,
            emitter,
            clipboard,
        }
    }

    /// View with a detached emitter and the given sink. No terminal, no listener.
    pub fn detached(
        config: TranscriptConfig,
        clipboard: Box<dyn ClipboardSink>,
    ) -> (Self, mpsc::UnboundedReceiver<TranscriptEvent>) {
        let (emitter, rx) = EventEmitter::channel();
        (Self::with_clipboard(config, emitter, clipboard), rx)
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // --- host-facing properties ---

    #[must_use]
    pub fn chat_thread(&self) -> &[TranscriptEntry] {
        &self.chat_thread
    }

    pub fn set_chat_thread(&mut self, entries: Vec<TranscriptEntry>) {
        self.chat_thread = entries;
        self.touch();
    }

    pub fn push_entry(&mut self, entry: TranscriptEntry) {
        self.chat_thread.push(entry);
        self.touch();
    }

    /// Append a streamed segment to the last entry. Ignored on an empty transcript.
    pub fn append_text_block(&mut self, block: TextBlock) {
        let Some(last) = self.chat_thread.last_mut() else {
            tracing::debug!("text block for empty transcript ignored");
            return;
        };
        last.text.push(block);
        self.touch();
    }

    /// Apply a closure to the last entry (attach citations, follow-ups, ...).
    pub fn update_last_entry(&mut self, f: impl FnOnce(&mut TranscriptEntry)) {
        if let Some(last) = self.chat_thread.last_mut() {
            f(last);
            self.touch();
        }
    }

    pub fn clear(&mut self) {
        self.chat_thread.clear();
        self.focused = None;
        self.selection = None;
        self.touch();
    }

    #[must_use]
    pub fn action_buttons(&self) -> &[ActionButtonSpec] {
        &self.action_buttons
    }

    pub fn set_action_buttons(&mut self, buttons: Vec<ActionButtonSpec>) {
        self.action_buttons = buttons;
        self.touch();
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if self.is_disabled != disabled {
            self.is_disabled = disabled;
            self.touch();
        }
    }

    #[must_use]
    pub fn is_processing_response(&self) -> bool {
        self.is_processing_response
    }

    pub fn set_processing_response(&mut self, processing: bool) {
        if self.is_processing_response != processing {
            self.is_processing_response = processing;
            self.touch();
        }
    }

    #[must_use]
    pub fn is_response_copied(&self) -> bool {
        self.copy_state.is_response_copied()
    }

    /// The copied flag never expires on its own; the host clears it.
    pub fn reset_copied(&mut self) {
        if self.copy_state.is_response_copied() {
            self.copy_state.reset();
            self.touch();
        }
    }

    // --- rendering ---

    #[must_use]
    pub fn project(&self) -> TranscriptTree {
        project(&ProjectionInput {
            entries: &self.chat_thread,
            action_buttons: &self.action_buttons,
            is_disabled: self.is_disabled,
            is_processing_response: self.is_processing_response,
            is_response_copied: self.copy_state.is_response_copied(),
            config: &self.config,
        })
    }

    /// Called by the render pass with the tree it drew. A re-render (new
    /// revision) forwards the tree's scroll requests to the scheduler; plain
    /// animation frames do not, or streaming would never go quiet.
    pub fn note_render(&mut self, tree: &TranscriptTree, now: Instant) {
        if self.rendered_revision == Some(self.revision) {
            return;
        }
        self.rendered_revision = Some(self.revision);
        for _ in 0..tree.scroll_requests {
            self.scheduler.request(ScrollTarget::FooterSentinel, now);
        }
    }

    // --- auto-scroll ---

    pub fn request_auto_scroll(&mut self, now: Instant) {
        self.scheduler.request(ScrollTarget::FooterSentinel, now);
    }

    #[must_use]
    pub fn next_scroll_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    #[must_use]
    pub fn has_pending_scroll(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Fire the pending scroll if its quiet period has elapsed. Returns
    /// whether a scroll was performed; a missing sentinel drops the request.
    pub fn fire_due_scroll(&mut self, now: Instant) -> bool {
        let Some(target) = self.scheduler.poll(now) else {
            return false;
        };
        match target {
            ScrollTarget::FooterSentinel => {
                let Some(row) = self.sentinel_row else {
                    tracing::debug!("auto-scroll fired without footer sentinel; dropped");
                    return false;
                };
                self.scroll.center_on(row);
                true
            }
        }
    }

    /// Manual scroll; a pending auto-scroll would yank the user back, so it goes.
    pub fn scroll_up(&mut self, rows: usize) {
        self.scheduler.cancel();
        self.scroll.scroll_up(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scheduler.cancel();
        self.scroll.scroll_down(rows);
    }

    // --- gestures ---

    /// Resolve a click at content coordinates. Returns the gesture so the
    /// caller can tell whether the default (selection) should still run.
    pub fn click_at(&mut self, row: usize, col: usize, mut gesture: Gesture) -> Gesture {
        let Some(region) = self.hits.region_at(row, col) else {
            return gesture;
        };
        let target = region.target;
        if region.enabled {
            self.focused = Some(target);
            self.activate(target, &mut gesture);
        } else {
            // A click on a disabled control is swallowed, not turned into a selection.
            gesture.prevent_default();
        }
        gesture
    }

    pub fn focus_next(&mut self) {
        self.focused = self.hits.next_focus(self.focused);
        self.scroll_focus_into_view();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.hits.prev_focus(self.focused);
        self.scroll_focus_into_view();
    }

    pub fn activate_focused(&mut self) -> Gesture {
        let mut gesture = Gesture::keyboard();
        if let Some(target) = self.focused {
            self.activate(target, &mut gesture);
        }
        gesture
    }

    fn scroll_focus_into_view(&mut self) {
        let Some(row) = self.focused.and_then(|t| self.hits.row_of(t)) else {
            return;
        };
        let viewport = usize::from(self.rendered_area.height);
        if row < self.scroll.target || row >= self.scroll.target + viewport {
            self.scroll.center_on(row);
        }
    }

    /// Route an activated target to its dispatcher. Disabled controls and
    /// targets that no longer resolve (transcript changed underneath) are ignored.
    pub fn activate(&mut self, target: ClickTarget, gesture: &mut Gesture) {
        match target {
            ClickTarget::ActionButton { entry, button } => {
                let (Some(spec), Some(owner)) =
                    (self.action_buttons.get(button), self.chat_thread.get(entry))
                else {
                    return;
                };
                if spec.is_disabled || owner.is_user_message {
                    return;
                }
                dispatch_action_button(&self.emitter, gesture, spec, owner);
            }
            ClickTarget::CopyResponse { .. } => {
                if self.is_disabled {
                    return;
                }
                gesture.prevent_default();
                self.copy_response();
            }
            ClickTarget::Citation { entry, citation } => {
                let Some(owner) = self.chat_thread.get(entry).filter(|e| !e.is_user_message) else {
                    return;
                };
                let Some(citations) = owner.visible_citations() else {
                    return;
                };
                let list = CitationList { label: &self.config.citations_label, citations };
                if let Some(click) = list.click(citation) {
                    gesture.prevent_default();
                    dispatch_citation(&self.emitter, click);
                }
            }
            ClickTarget::Followup { entry, question } => {
                let Some(text) = self
                    .chat_thread
                    .get(entry)
                    .filter(|e| !e.is_user_message)
                    .and_then(TranscriptEntry::visible_followups)
                    .and_then(|q| q.get(question))
                else {
                    return;
                };
                dispatch_followup(&self.emitter, gesture, text);
            }
        }
    }

    /// The built-in copy button: last block of the last entry to the clipboard.
    pub fn copy_response(&mut self) -> bool {
        let was_copied = self.copy_state.is_response_copied();
        let copied =
            copy_last_response(&self.chat_thread, self.clipboard.as_mut(), &mut self.copy_state);
        if copied && !was_copied {
            self.touch();
        }
        copied
    }

    /// Copy the current mouse selection. Returns `false` when nothing is selected.
    pub fn copy_selection(&mut self) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        let text = super::selection::selected_text(&self.rendered_lines, selection);
        if text.trim().is_empty() {
            return false;
        }
        if let Err(err) = self.clipboard.set_text(&text) {
            tracing::debug!(error = %err, "clipboard rejected selection copy");
        }
        true
    }
}
