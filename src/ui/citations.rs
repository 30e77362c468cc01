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

//! Citation list sub-widget. Takes a heading and the citations, renders
//! footnote-numbered rows, and raises [`CitationClick`] for a clicked row.

use crate::transcript::Citation;
use crate::ui::message::wrap_text;
use crate::ui::theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// Raised when a citation row is activated. The transcript re-emits it as is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitationClick {
    /// Zero-based position in the list; shown to the user as `[index + 1]`.
    pub index: usize,
    pub citation: Citation,
}

/// One clickable row produced by [`CitationList::lines`]. A citation that
/// wraps yields one row per line, all with the same `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationRow {
    /// Offset into the returned lines.
    pub line: usize,
    pub cols: std::ops::Range<usize>,
    pub index: usize,
}

pub struct CitationList<'a> {
    pub label: &'a str,
    pub citations: &'a [Citation],
}

impl CitationList<'_> {
    /// Heading plus one entry per citation, wrapped to `width` columns
    /// (0 means unbounded).
    pub fn lines(
        &self,
        focused: Option<usize>,
        width: usize,
    ) -> (Vec<Line<'static>>, Vec<CitationRow>) {
        let mut lines = vec![Line::from(Span::styled(
            self.label.to_owned(),
            Style::default().fg(theme::DIM).add_modifier(Modifier::BOLD),
        ))];
        let mut rows = Vec::with_capacity(self.citations.len());
        let indent = "  ";
        let start = indent.width();
        let avail = if width == 0 { usize::MAX } else { width.saturating_sub(start).max(1) };
        for (index, citation) in self.citations.iter().enumerate() {
            let text = format!("[{}] {}", index + 1, citation.label());
            let mut style = Style::default().fg(theme::CITATION).add_modifier(Modifier::UNDERLINED);
            if focused == Some(index) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            for row in wrap_text(&text, avail) {
                let end = start + row.width();
                rows.push(CitationRow { line: lines.len(), cols: start..end, index });
                lines.push(Line::from(vec![Span::raw(indent), Span::styled(row, style)]));
            }
        }
        (lines, rows)
    }

    #[must_use]
    pub fn click(&self, index: usize) -> Option<CitationClick> {
        self.citations.get(index).map(|c| CitationClick { index, citation: c.clone() })
    }
}
