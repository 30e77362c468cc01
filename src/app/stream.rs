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

//! Host-side conversation updates and a simulated streaming reply.
//!
//! The transcript view never produces entries itself. In the binary the
//! "conversation controller" is this module: it feeds [`HostUpdate`]s over a
//! channel the same way a real backend would.

use super::TranscriptView;
use crate::transcript::{Citation, EntryError, TextBlock, TranscriptEntry};
use serde_json::json;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum HostUpdate {
    UserMessage(TranscriptEntry),
    /// Append an empty assistant entry and mark the response as in flight.
    BeginResponse { timestamp: String },
    AppendBlock(TextBlock),
    FinishResponse { citations: Vec<Citation>, followups: Vec<String> },
    FailResponse { message: String },
}

/// Apply one update. Sending and receiving are disabled while a response
/// is in flight.
pub fn apply_host_update(view: &mut TranscriptView, update: HostUpdate) {
    match update {
        HostUpdate::UserMessage(entry) => view.push_entry(entry),
        HostUpdate::BeginResponse { timestamp } => {
            view.push_entry(TranscriptEntry::assistant(timestamp));
            view.set_processing_response(true);
            view.set_disabled(true);
            view.reset_copied();
        }
        HostUpdate::AppendBlock(block) => view.append_text_block(block),
        HostUpdate::FinishResponse { citations, followups } => {
            view.update_last_entry(|entry| {
                entry.citations = Some(citations);
                entry.followup_questions = Some(followups);
            });
            view.set_processing_response(false);
            view.set_disabled(false);
        }
        HostUpdate::FailResponse { message } => {
            view.update_last_entry(|entry| entry.error = Some(EntryError { message }));
            view.set_processing_response(false);
            view.set_disabled(false);
        }
    }
}

/// Updates for one canned reply to `prompt`, in delivery order.
pub fn scripted_reply(prompt: &str) -> Vec<HostUpdate> {
    let mut updates = vec![HostUpdate::BeginResponse { timestamp: clock_timestamp() }];
    updates.push(HostUpdate::AppendBlock(TextBlock::new(format!(
        "Looking into **{}**<sup>1</sup>.",
        prompt.trim()
    ))));
    updates.push(HostUpdate::AppendBlock(TextBlock::new(
        "The short answer: it depends on how the key is scoped<sup>2</sup>.",
    )));
    updates.push(HostUpdate::AppendBlock(
        TextBlock::new("Here is what to check:").with_steps(vec![
            "Confirm which environment uses the key".to_owned(),
            "Review the audit log for recent calls".to_owned(),
            "Apply the change and watch error rates".to_owned(),
        ]),
    ));
    updates.push(HostUpdate::FinishResponse {
        citations: vec![
            Citation::new(json!({"id": "r1", "label": "runbook.md"})),
            Citation::new(json!({"id": "r2", "label": "scopes-reference.html"})),
        ],
        followups: vec![
            "What if the audit log is empty?".to_owned(),
            "Can this be automated?".to_owned(),
        ],
    });
    updates
}

/// Deliver `updates` one per `interval` on the local task set.
pub fn spawn_scripted_stream(
    tx: mpsc::UnboundedSender<HostUpdate>,
    updates: Vec<HostUpdate>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_local(async move {
        for update in updates {
            tokio::time::sleep(interval).await;
            if tx.send(update).is_err() {
                tracing::debug!("host update receiver dropped; stopping stream");
                return;
            }
        }
    })
}

/// `HH:MM:SS` in UTC.
pub fn clock_timestamp() -> String {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs()) % 86_400;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests_support::recording_view;

    #[test]
    fn scripted_reply_streams_into_one_entry() {
        let (mut view, _rx, _sink) = recording_view();
        view.push_entry(TranscriptEntry::user("q", "t"));
        let updates = scripted_reply("q");
        let blocks = updates.iter().filter(|u| matches!(u, HostUpdate::AppendBlock(_))).count();
        for update in updates {
            apply_host_update(&mut view, update);
        }
        assert_eq!(view.chat_thread().len(), 2);
        let reply = &view.chat_thread()[1];
        assert_eq!(reply.text.len(), blocks);
        assert!(reply.visible_citations().is_some());
        assert!(reply.visible_followups().is_some());
        assert!(!view.is_processing_response());
        assert!(!view.is_disabled());
    }

    #[test]
    fn begin_response_disables_and_marks_processing() {
        let (mut view, _rx, _sink) = recording_view();
        apply_host_update(&mut view, HostUpdate::BeginResponse { timestamp: "t".into() });
        assert!(view.is_processing_response());
        assert!(view.is_disabled());
    }

    #[test]
    fn failed_response_carries_error() {
        let (mut view, _rx, _sink) = recording_view();
        apply_host_update(&mut view, HostUpdate::BeginResponse { timestamp: "t".into() });
        apply_host_update(&mut view, HostUpdate::FailResponse { message: "timeout".into() });
        let error = view.chat_thread()[0].error.as_ref().map(|e| e.message.clone());
        assert_eq!(error.as_deref(), Some("timeout"));
        assert!(!view.is_processing_response());
    }

    #[test]
    fn clock_timestamp_is_hh_mm_ss() {
        let ts = clock_timestamp();
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.as_bytes()[2], b':');
    }
}
