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

use super::Citation;
use serde::{Deserialize, Serialize};

/// One turn in the conversation, as handed over by the host.
///
/// Field names serialize in camelCase so host JSON (`isUserMessage`,
/// `followupQuestions`, ...) loads without a translation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub is_user_message: bool,
    /// Streamed segments land here as separate blocks.
    #[serde(default)]
    pub text: Vec<TextBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<Citation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followup_questions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<EntryError>,
    #[serde(default)]
    pub timestamp: String,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            is_user_message: true,
            text: vec![TextBlock::new(text)],
            citations: None,
            followup_questions: None,
            error: None,
            timestamp: timestamp.into(),
        }
    }

    /// Assistant entry with no text blocks yet (a response about to stream in).
    pub fn assistant(timestamp: impl Into<String>) -> Self {
        Self {
            is_user_message: false,
            text: Vec::new(),
            citations: None,
            followup_questions: None,
            error: None,
            timestamp: timestamp.into(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, block: TextBlock) -> Self {
        self.text.push(block);
        self
    }

    #[must_use]
    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = Some(citations);
        self
    }

    #[must_use]
    pub fn with_followups(mut self, questions: Vec<String>) -> Self {
        self.followup_questions = Some(questions);
        self
    }

    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(EntryError { message: message.into() });
        self
    }

    /// Citations, treating an empty set the same as an absent one.
    #[must_use]
    pub fn visible_citations(&self) -> Option<&[Citation]> {
        self.citations.as_deref().filter(|c| !c.is_empty())
    }

    /// Follow-up questions, treating an empty list the same as an absent one.
    #[must_use]
    pub fn visible_followups(&self) -> Option<&[String]> {
        self.followup_questions.as_deref().filter(|q| !q.is_empty())
    }

    #[must_use]
    pub fn last_text(&self) -> Option<&str> {
        self.text.last().map(|block| block.value.as_str())
    }
}

/// One rendered segment of a reply, optionally followed by numbered steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_steps: Option<Vec<String>>,
}

impl TextBlock {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), following_steps: None }
    }

    #[must_use]
    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        self.following_steps = Some(steps);
        self
    }

    #[must_use]
    pub fn visible_steps(&self) -> Option<&[String]> {
        self.following_steps.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryError {
    pub message: String,
}

/// Host-supplied description of an extra per-message action ("regenerate", "like", ...).
/// Rendered identically on every non-user entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionButtonSpec {
    pub id: String,
    pub label: String,
    /// Glyph shown before the label.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub is_disabled: bool,
}

impl ActionButtonSpec {
    pub fn new(id: impl Into<String>, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), icon: icon.into(), is_disabled: false }
    }

    #[must_use]
    pub fn disabled(mut self, is_disabled: bool) -> Self {
        self.is_disabled = is_disabled;
        self
    }
}
