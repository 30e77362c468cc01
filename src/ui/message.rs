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

use crate::app::ClickTarget;
use crate::ui::citations::CitationList;
use crate::ui::markdown;
use crate::ui::theme;
use crate::ui::transcript::{ActionRow, FollowupsNode, MessageNode, TextBlockNode};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::ops::Range;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Clickable columns of one logical line. `line` indexes the shared output
/// vector; chat layout converts it to a visual row. Clickable lines are laid
/// out to fit the wrap width, so each one occupies exactly one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHit {
    pub line: usize,
    pub cols: Range<usize>,
    pub target: ClickTarget,
    pub enabled: bool,
}

/// Append one message to `out`, recording its clickable spans in `hits`.
/// `width` is the wrap width in columns; 0 means unbounded.
pub fn render_message(
    node: &MessageNode,
    focused: Option<ClickTarget>,
    width: usize,
    out: &mut Vec<Line<'static>>,
    hits: &mut Vec<LineHit>,
) {
    let entry = node.entry;
    let width = if width == 0 { usize::MAX } else { width };

    if let Some(row) = &node.actions {
        render_action_row(entry, row, focused, width, out, hits);
    }

    let bg = node.is_user_message.then_some(theme::USER_MSG_BG);
    for block in &node.blocks {
        render_text_block(block, bg, out);
    }

    if let Some(citations) = &node.citations {
        let list = CitationList { label: &citations.label, citations: &citations.citations };
        let focused_citation = match focused {
            Some(ClickTarget::Citation { entry: e, citation }) if e == entry => Some(citation),
            _ => None,
        };
        let base = out.len();
        let (lines, rows) = list.lines(focused_citation, width);
        out.extend(lines);
        hits.extend(rows.into_iter().map(|row| LineHit {
            line: base + row.line,
            cols: row.cols,
            target: ClickTarget::Citation { entry, citation: row.index },
            enabled: true,
        }));
    }

    if let Some(followups) = &node.followups {
        render_followups(entry, followups, focused, width, out, hits);
    }

    if let Some(message) = &node.error {
        out.push(Line::from(Span::styled(
            format!("{} {message}", theme::ICON_ERROR),
            Style::default().fg(theme::STATUS_ERROR),
        )));
    }

    let author_color = if node.is_user_message { theme::ROLE_USER } else { theme::ROLE_ASSISTANT };
    out.push(Line::from(vec![
        Span::styled(
            node.footer.author.clone(),
            Style::default().fg(author_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" \u{00b7} {}", node.footer.timestamp),
            Style::default().fg(theme::DIM),
        ),
    ]));

    // Blank separator between messages
    out.push(Line::default());
}

/// Buttons flow left to right and break onto a new line before one that
/// would cross `width`. A button is never split across rows.
fn render_action_row(
    entry: usize,
    row: &ActionRow,
    focused: Option<ClickTarget>,
    width: usize,
    out: &mut Vec<Line<'static>>,
    hits: &mut Vec<LineHit>,
) {
    let mut buttons: Vec<(String, ClickTarget, bool, bool)> = row
        .buttons
        .iter()
        .map(|button| {
            let target = ClickTarget::ActionButton { entry, button: button.index };
            (button_text(&button.icon, &button.label), target, button.disabled, false)
        })
        .collect();
    buttons.push((
        button_text(&row.copy.icon, &row.copy.label),
        ClickTarget::CopyResponse { entry },
        row.copy.disabled,
        row.copy.copied,
    ));

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut col = 0;
    for (text, target, disabled, copied) in buttons {
        let text = truncate_to_width(&text, width);
        let text_width = text.width();
        if !spans.is_empty() {
            if col + 1 + text_width > width {
                out.push(Line::from(std::mem::take(&mut spans)));
                col = 0;
            } else {
                spans.push(Span::raw(" "));
                col += 1;
            }
        }
        let color = if copied { theme::BUTTON_COPIED } else { theme::BUTTON };
        let mut style = Style::default().fg(color);
        if disabled {
            style = Style::default().fg(theme::DIM).add_modifier(Modifier::DIM);
        }
        if focused == Some(target) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        hits.push(LineHit {
            line: out.len(),
            cols: col..col + text_width,
            target,
            enabled: !disabled,
        });
        col += text_width;
        spans.push(Span::styled(text, style));
    }
    out.push(Line::from(spans));
}

fn button_text(icon: &str, label: &str) -> String {
    if icon.is_empty() { format!("[{label}]") } else { format!("[{icon} {label}]") }
}

fn render_text_block(
    block: &TextBlockNode,
    bg: Option<ratatui::style::Color>,
    out: &mut Vec<Line<'static>>,
) {
    out.extend(markdown::render_rich_text(&block.value, bg));
    if let Some(steps) = &block.steps {
        for (i, step) in steps.iter().enumerate() {
            // One row per step: rendered lines are joined back with spaces.
            let mut spans =
                vec![Span::styled(format!("  {}. ", i + 1), Style::default().fg(theme::DIM))];
            let rendered = markdown::render_rich_text(step, bg);
            for (n, line) in rendered.into_iter().filter(|l| l.width() > 0).enumerate() {
                if n > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.extend(line.spans);
            }
            out.push(Line::from(spans));
        }
    }
}

fn render_followups(
    entry: usize,
    followups: &FollowupsNode,
    focused: Option<ClickTarget>,
    width: usize,
    out: &mut Vec<Line<'static>>,
    hits: &mut Vec<LineHit>,
) {
    out.push(Line::from(Span::styled(
        followups.label.clone(),
        Style::default().fg(theme::DIM).add_modifier(Modifier::BOLD),
    )));
    let prefix = format!("  {} ", theme::ICON_FOLLOWUP);
    let start = prefix.width();
    let continuation = " ".repeat(start);
    for (question_idx, question) in followups.questions.iter().enumerate() {
        let target = ClickTarget::Followup { entry, question: question_idx };
        let mut style = Style::default().fg(theme::FOLLOWUP);
        if focused == Some(target) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let rows = wrap_text(question, width.saturating_sub(start).max(1));
        for (n, row) in rows.into_iter().enumerate() {
            let lead = if n == 0 { prefix.clone() } else { continuation.clone() };
            hits.push(LineHit {
                line: out.len(),
                cols: start..start + row.width(),
                target,
                enabled: true,
            });
            out.push(Line::from(vec![
                Span::styled(lead, Style::default().fg(theme::DIM)),
                Span::styled(row, style),
            ]));
        }
    }
}

/// Greedy word wrap to `width` columns. Words longer than a row are split
/// between characters. Always returns at least one row.
pub(super) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.width() <= width {
        return vec![text.to_owned()];
    }
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for word in text.split_inclusive(' ') {
        let word_width = word.trim_end().width();
        if !current.is_empty() && current_width + word_width > width {
            rows.push(current.trim_end().to_owned());
            current.clear();
            current_width = 0;
        }
        if word_width <= width {
            current.push_str(word);
            current_width += word.width();
            continue;
        }
        for ch in word.chars() {
            if ch == ' ' && current.is_empty() {
                continue;
            }
            let ch_width = ch.width().unwrap_or(0);
            if !current.is_empty() && current_width + ch_width > width {
                rows.push(std::mem::take(&mut current).trim_end().to_owned());
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }
    let tail = current.trim_end();
    if !tail.is_empty() || rows.is_empty() {
        rows.push(tail.to_owned());
    }
    rows
}

/// Cut `text` to `width` columns, marking the cut with an ellipsis.
fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_owned();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('\u{2026}');
    out
}
