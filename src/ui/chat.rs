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

use crate::app::{HitRegion, SelectionState, TranscriptView};
use crate::ui::message::{self, LineHit};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Widget, Wrap};
use std::time::Instant;

#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, area: Rect, view: &mut TranscriptView, now: Instant) {
    let tree = view.project();
    view.note_render(&tree, now);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut line_hits: Vec<LineHit> = Vec::new();
    let width = usize::from(area.width);
    for node in &tree.items {
        message::render_message(node, view.focused, width, &mut lines, &mut line_hits);
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No messages yet.",
            Style::default().fg(theme::DIM),
        )));
    }

    // Visual row where each logical line starts once wrapped.
    let mut row_starts = Vec::with_capacity(lines.len());
    let mut content_height = 0;
    for line in &lines {
        row_starts.push(content_height);
        content_height += wrapped_height(line, area.width);
    }

    view.hits.clear();
    for hit in line_hits {
        view.hits.push(HitRegion {
            row: row_starts[hit.line],
            cols: hit.cols,
            target: hit.target,
            enabled: hit.enabled,
        });
    }
    if view.focused.is_some_and(|t| view.hits.row_of(t).is_none()) {
        view.focused = None;
    }

    // The trailing blank separator of the last message is the footer sentinel.
    view.sentinel_row = (!tree.items.is_empty()).then(|| content_height.saturating_sub(1));

    view.scroll.set_bounds(content_height, usize::from(area.height));
    view.scroll.step();

    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    view.rendered_area = area;
    view.rendered_lines = render_lines_from_paragraph(&paragraph, area, view.scroll.offset);
    frame.render_widget(paragraph.scroll((view.scroll.offset as u16, 0)), area);

    if let Some(sel) = view.selection {
        frame.render_widget(SelectionOverlay { selection: sel }, area);
    }
}

fn wrapped_height(line: &Line<'static>, width: u16) -> usize {
    if width == 0 {
        return 1;
    }
    Paragraph::new(line.clone()).wrap(Wrap { trim: false }).line_count(width).max(1)
}

struct SelectionOverlay {
    selection: SelectionState,
}

impl Widget for SelectionOverlay {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (start, end) =
            crate::app::normalize_selection(self.selection.start, self.selection.end);
        for row in start.row..=end.row {
            let y = area.y.saturating_add(row as u16);
            if y >= area.bottom() {
                break;
            }
            let row_start = if row == start.row { start.col } else { 0 };
            let row_end = if row == end.row { end.col } else { area.width as usize };
            for col in row_start..row_end {
                let x = area.x.saturating_add(col as u16);
                if x >= area.right() {
                    break;
                }
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_style(cell.style().add_modifier(Modifier::REVERSED));
                }
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_lines_from_paragraph(
    paragraph: &Paragraph,
    area: Rect,
    scroll_offset: usize,
) -> Vec<String> {
    let mut buf = Buffer::empty(area);
    let widget = paragraph.clone().scroll((scroll_offset as u16, 0));
    widget.render(area, &mut buf);
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in 0..area.height {
        let mut line = String::new();
        for x in 0..area.width {
            if let Some(cell) = buf.cell((area.x + x, area.y + y)) {
                line.push_str(cell.symbol());
            }
        }
        lines.push(line.trim_end().to_owned());
    }
    lines
}
