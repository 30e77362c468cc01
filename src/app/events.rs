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

use super::{Gesture, SelectionPoint, SelectionState, TranscriptView};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

const MOUSE_SCROLL_LINES: usize = 3;

pub fn handle_terminal_event(view: &mut TranscriptView, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(view, key),
        Event::Mouse(mouse) => handle_mouse_event(view, mouse),
        // Resize is handled automatically by ratatui
        _ => {}
    }
}

fn handle_key(view: &mut TranscriptView, key: KeyEvent) {
    let page = usize::from(view.rendered_area.height.max(1));
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => {
            if view.copy_selection() {
                view.selection = None;
            } else {
                view.should_quit = true;
            }
        }
        (KeyCode::Char('q'), _) => view.should_quit = true,
        (KeyCode::Esc, _) => {
            if view.selection.is_some() {
                view.selection = None;
            } else if view.focused.is_some() {
                view.focused = None;
            } else {
                view.should_quit = true;
            }
        }
        (KeyCode::Tab, _) => view.focus_next(),
        (KeyCode::BackTab, _) => view.focus_prev(),
        (KeyCode::Enter | KeyCode::Char(' '), _) => {
            view.activate_focused();
        }
        (KeyCode::Up, _) => view.scroll_up(1),
        (KeyCode::Down, _) => view.scroll_down(1),
        (KeyCode::PageUp, _) => view.scroll_up(page),
        (KeyCode::PageDown, _) => view.scroll_down(page),
        (KeyCode::Home, _) => view.scroll_up(usize::MAX),
        (KeyCode::End, _) => view.scroll_down(usize::MAX),
        _ => {}
    }
}

fn handle_mouse_event(view: &mut TranscriptView, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(point) = viewport_point(view, mouse) else {
                view.selection = None;
                return;
            };
            let content_row = point.row + view.scroll.offset;
            let gesture = view.click_at(content_row, point.col, Gesture::mouse());
            view.selection = if gesture.is_default_prevented() {
                None
            } else {
                Some(SelectionState { start: point, end: point, dragging: true })
            };
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let point = viewport_point(view, mouse);
            if let (Some(sel), Some(point)) = (&mut view.selection, point) {
                sel.end = point;
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(sel) = &mut view.selection {
                sel.dragging = false;
            }
        }
        MouseEventKind::ScrollUp => view.scroll_up(MOUSE_SCROLL_LINES),
        MouseEventKind::ScrollDown => view.scroll_down(MOUSE_SCROLL_LINES),
        _ => {}
    }
}

/// Mouse position relative to the transcript area, if inside it.
fn viewport_point(view: &TranscriptView, mouse: MouseEvent) -> Option<SelectionPoint> {
    let area = view.rendered_area;
    if mouse.column >= area.x
        && mouse.column < area.right()
        && mouse.row >= area.y
        && mouse.row < area.bottom()
    {
        return Some(SelectionPoint {
            row: usize::from(mouse.row - area.y),
            col: usize::from(mouse.column - area.x),
        });
    }
    None
}
