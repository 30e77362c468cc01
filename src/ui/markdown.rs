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

//! Rich text for text blocks: markdown plus the small inline-HTML subset
//! hosts embed in pre-rendered answers (`<sup>n</sup>` footnote markers,
//! `<br>`, entity escapes). Unknown tags are dropped, never shown raw.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use std::panic::{self, AssertUnwindSafe};

pub(super) fn render_rich_text(text: &str, bg: Option<Color>) -> Vec<Line<'static>> {
    let markdown = preprocess_headings(&inline_html_to_markdown(text));
    render_markdown_safe_with(&markdown, bg, render_with_tui_markdown)
}

fn render_markdown_safe_with<F>(text: &str, bg: Option<Color>, renderer: F) -> Vec<Line<'static>>
where
    F: FnOnce(&str, Option<Color>) -> Vec<Line<'static>>,
{
    if let Ok(lines) = panic::catch_unwind(AssertUnwindSafe(|| renderer(text, bg))) {
        lines
    } else {
        tracing::warn!("tui-markdown panic; falling back to plain-text rendering");
        plain_text_fallback(text, bg)
    }
}

fn render_with_tui_markdown(text: &str, bg: Option<Color>) -> Vec<Line<'static>> {
    let rendered = tui_markdown::from_str(text);
    rendered
        .lines
        .into_iter()
        .map(|line| {
            let owned_spans: Vec<Span<'static>> = line
                .spans
                .into_iter()
                .map(|span| {
                    let style =
                        if let Some(bg_color) = bg { span.style.bg(bg_color) } else { span.style };
                    Span::styled(span.content.into_owned(), style)
                })
                .collect();
            let line_style =
                if let Some(bg_color) = bg { line.style.bg(bg_color) } else { line.style };
            Line::from(owned_spans).style(line_style)
        })
        .collect()
}

fn plain_text_fallback(text: &str, bg: Option<Color>) -> Vec<Line<'static>> {
    let style =
        if let Some(bg_color) = bg { Style::default().bg(bg_color) } else { Style::default() };

    text.split('\n').map(|line| Line::from(Span::styled(line.to_owned(), style))).collect()
}

/// `# Title` → `**Title**`; tui-markdown renders headings with literal hashes.
fn preprocess_headings(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            let content = trimmed.trim_start_matches('#').trim();
            if !content.is_empty() {
                if !result.is_empty() && !result.ends_with("\n\n") {
                    result.push('\n');
                }
                result.push_str("**");
                result.push_str(content);
                result.push_str("**\n");
                continue;
            }
        }
        result.push_str(line);
        result.push('\n');
    }
    if !text.ends_with('\n') {
        result.pop();
    }
    result
}

fn inline_html_to_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        out.push_str(&decode_entities(&rest[..open]));
        let after = &rest[open..];
        let Some(close) = after.find('>') else {
            out.push_str(&decode_entities(after));
            return out;
        };
        let tag = after[1..close].trim().to_ascii_lowercase();
        match tag.trim_end_matches('/').trim() {
            "sup" => out.push('['),
            "/sup" => out.push(']'),
            "br" => out.push('\n'),
            "/p" | "/div" | "/li" => out.push('\n'),
            "b" | "strong" | "/b" | "/strong" => out.push_str("**"),
            "i" | "em" | "/i" | "/em" => out.push('*'),
            "code" | "/code" => out.push('`'),
            _ => {}
        }
        rest = &after[close + 1..];
    }
    out.push_str(&decode_entities(rest));
    out
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::catch_unwind;

    fn joined(lines: &[Line<'_>]) -> String {
        lines.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn sup_markers_become_footnote_brackets() {
        assert_eq!(inline_html_to_markdown("rotate<sup>1</sup>."), "rotate[1].");
    }

    #[test]
    fn unknown_tags_are_dropped_and_entities_decoded() {
        assert_eq!(
            inline_html_to_markdown("<span class=\"x\">a &amp; b &lt;3</span>"),
            "a & b <3"
        );
    }

    #[test]
    fn unterminated_tag_is_kept_as_text() {
        assert_eq!(inline_html_to_markdown("1 < 2"), "1 < 2");
    }

    #[test]
    fn headings_render_without_hashes() {
        let text = joined(&render_rich_text("# Title\nbody", None));
        assert!(text.contains("Title"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn rich_text_does_not_panic_on_weird_inputs() {
        let weird_inputs = [
            "- [ ] item",
            "[]()[]()[]()",
            "```md\n- [ ] fenced\n```",
            "<sup><sup>1</sup>",
            "<<>>",
            "&amp;&amp;&",
            "# \n#\n##",
        ];
        for input in weird_inputs {
            let result = catch_unwind(|| render_rich_text(input, None));
            assert!(result.is_ok(), "input triggered panic: {input}");
        }
    }

    #[test]
    fn falls_back_when_renderer_panics() {
        let lines = render_markdown_safe_with("line1\nline2", None, |_text, _bg| {
            panic!("forced renderer panic for fallback path")
        });
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content.as_ref(), "line1");
    }
}
