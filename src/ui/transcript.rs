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

//! Pure projection of the entry list into a renderable tree.
//!
//! `project` has no side effects: same inputs, same tree. Things the render
//! pass must act on (auto-scroll requests) are reported as data on the tree.

use crate::config::TranscriptConfig;
use crate::transcript::{ActionButtonSpec, Citation, TranscriptEntry};

/// Everything the projection reads. Borrowed for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionInput<'a> {
    pub entries: &'a [TranscriptEntry],
    pub action_buttons: &'a [ActionButtonSpec],
    pub is_disabled: bool,
    pub is_processing_response: bool,
    pub is_response_copied: bool,
    pub config: &'a TranscriptConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptTree {
    pub items: Vec<MessageNode>,
    /// One per text block processed while a response is streaming.
    pub scroll_requests: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageNode {
    pub entry: usize,
    pub is_user_message: bool,
    /// Absent on user entries.
    pub actions: Option<ActionRow>,
    pub blocks: Vec<TextBlockNode>,
    pub citations: Option<CitationsNode>,
    pub followups: Option<FollowupsNode>,
    pub error: Option<String>,
    pub footer: FooterNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRow {
    pub buttons: Vec<ActionButtonNode>,
    pub copy: CopyButtonNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButtonNode {
    pub index: usize,
    pub id: String,
    pub label: String,
    pub icon: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyButtonNode {
    pub label: String,
    pub icon: String,
    pub disabled: bool,
    pub copied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlockNode {
    pub value: String,
    pub steps: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CitationsNode {
    pub label: String,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowupsNode {
    pub label: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterNode {
    pub timestamp: String,
    pub author: String,
}

#[must_use]
pub fn project(input: &ProjectionInput<'_>) -> TranscriptTree {
    let mut scroll_requests = 0;
    let items = input
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let node = project_entry(i, entry, input);
            if input.is_processing_response {
                scroll_requests += node.blocks.len();
            }
            node
        })
        .collect();
    TranscriptTree { items, scroll_requests }
}

fn project_entry(
    index: usize,
    entry: &TranscriptEntry,
    input: &ProjectionInput<'_>,
) -> MessageNode {
    let is_user = entry.is_user_message;
    let config = input.config;

    let actions = (!is_user).then(|| action_row(input));

    let blocks = entry
        .text
        .iter()
        .map(|block| TextBlockNode {
            value: block.value.clone(),
            steps: block.visible_steps().map(<[String]>::to_vec),
        })
        .collect();

    // User entries never show citations or follow-ups, whatever they carry.
    let citations = if is_user {
        None
    } else {
        entry.visible_citations().map(|c| CitationsNode {
            label: config.citations_label.clone(),
            citations: c.to_vec(),
        })
    };
    let followups = if is_user {
        None
    } else {
        entry.visible_followups().map(|q| FollowupsNode {
            label: config.followups_label.clone(),
            questions: q.to_vec(),
        })
    };

    let author = if is_user { config.user_label.clone() } else { config.bot_label.clone() };

    MessageNode {
        entry: index,
        is_user_message: is_user,
        actions,
        blocks,
        citations,
        followups,
        error: entry.error.as_ref().map(|e| e.message.clone()),
        footer: FooterNode { timestamp: entry.timestamp.clone(), author },
    }
}

fn action_row(input: &ProjectionInput<'_>) -> ActionRow {
    let buttons = input
        .action_buttons
        .iter()
        .enumerate()
        .map(|(index, spec)| ActionButtonNode {
            index,
            id: spec.id.clone(),
            label: spec.label.clone(),
            icon: spec.icon.clone(),
            disabled: spec.is_disabled,
        })
        .collect();
    let config = input.config;
    let copy = if input.is_response_copied {
        CopyButtonNode {
            label: config.copied_label.clone(),
            icon: config.copied_icon.clone(),
            disabled: input.is_disabled,
            copied: true,
        }
    } else {
        CopyButtonNode {
            label: config.copy_label.clone(),
            icon: config.copy_icon.clone(),
            disabled: input.is_disabled,
            copied: false,
        }
    };
    ActionRow { buttons, copy }
}
