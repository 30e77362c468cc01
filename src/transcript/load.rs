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

use super::{ActionButtonSpec, Citation, TextBlock, TranscriptEntry};
use crate::error::AppError;
use serde_json::json;
use std::path::Path;

pub fn load_transcript(path: &Path) -> Result<Vec<TranscriptEntry>, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| AppError::TranscriptLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let entries: Vec<TranscriptEntry> =
        serde_json::from_str(&raw).map_err(|e| AppError::TranscriptLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "loaded transcript");
    Ok(entries)
}

pub fn load_action_buttons(path: &Path) -> Result<Vec<ActionButtonSpec>, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| AppError::ActionsLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| AppError::ActionsLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn default_action_buttons() -> Vec<ActionButtonSpec> {
    vec![
        ActionButtonSpec::new("regenerate", "Regenerate", "\u{21bb}"),
        ActionButtonSpec::new("like", "Like", "\u{2661}"),
    ]
}

/// Conversation shown when no `--transcript` is given.
pub fn sample_transcript() -> Vec<TranscriptEntry> {
    vec![
        TranscriptEntry::user("How do I rotate my API key?", "09:41"),
        TranscriptEntry::assistant("09:41")
            .with_text(
                TextBlock::new(
                    "You can rotate a key from the **Settings** page<sup>1</sup>. \
                     The old key stays valid for 24 hours<sup>2</sup>.",
                )
                .with_steps(vec![
                    "Open Settings \u{2192} API keys".to_owned(),
                    "Click *Rotate* next to the key".to_owned(),
                    "Update your deployments with the new value".to_owned(),
                ]),
            )
            .with_citations(vec![
                Citation::new(json!({"id": "c1", "label": "settings-guide.md"})),
                Citation::new(json!({"id": "c2", "label": "key-lifecycle.pdf"})),
            ])
            .with_followups(vec![
                "Can I shorten the grace period?".to_owned(),
                "How do I audit key usage?".to_owned(),
            ]),
        TranscriptEntry::user("And if rotation fails?", "09:42"),
        TranscriptEntry::assistant("09:42")
            .with_text(TextBlock::new("Rotation is retried automatically."))
            .with_error("The response was cut short. Try regenerating it."),
    ]
}
