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

use super::{SelectionPoint, SelectionState};

pub(crate) fn normalize_selection(
    a: SelectionPoint,
    b: SelectionPoint,
) -> (SelectionPoint, SelectionPoint) {
    if (a.row, a.col) <= (b.row, b.col) { (a, b) } else { (b, a) }
}

/// Text under `sel`, read from the rows as they were last drawn.
pub(super) fn selected_text(lines: &[String], sel: SelectionState) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let (start, end) = normalize_selection(sel.start, sel.end);
    if start.row >= lines.len() {
        return String::new();
    }
    let last_row = end.row.min(lines.len() - 1);

    let mut out = String::new();
    for row in start.row..=last_row {
        let line = lines.get(row).map_or("", String::as_str);
        let start_col = if row == start.row { start.col } else { 0 };
        let end_col = if row == end.row { end.col } else { line.chars().count() };
        out.push_str(&slice_by_cols(line, start_col, end_col));
        if row < last_row {
            out.push('\n');
        }
    }
    out
}

fn slice_by_cols(text: &str, start_col: usize, end_col: usize) -> String {
    text.chars().take(end_col).skip(start_col).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(row: usize, col: usize) -> SelectionPoint {
        SelectionPoint { row, col }
    }

    #[test]
    fn normalize_orders_points() {
        let (a, b) = normalize_selection(point(3, 1), point(1, 5));
        assert_eq!((a, b), (point(1, 5), point(3, 1)));
    }

    #[test]
    fn single_row_selection_slices_columns() {
        let lines = vec!["Hello world".to_owned()];
        let sel = SelectionState { start: point(0, 6), end: point(0, 11), dragging: false };
        assert_eq!(selected_text(&lines, sel), "world");
    }

    #[test]
    fn multi_row_selection_joins_with_newlines() {
        let lines = vec!["first".to_owned(), "second".to_owned(), "third".to_owned()];
        let sel = SelectionState { start: point(2, 3), end: point(0, 2), dragging: false };
        assert_eq!(selected_text(&lines, sel), "rst\nsecond\nthi");
    }

    #[test]
    fn selection_past_end_is_clamped() {
        let lines = vec!["only".to_owned()];
        let sel = SelectionState { start: point(0, 0), end: point(9, 9), dragging: false };
        assert_eq!(selected_text(&lines, sel), "only");
        let outside = SelectionState { start: point(4, 0), end: point(9, 9), dragging: false };
        assert_eq!(selected_text(&lines, outside), "");
    }
}
