use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::Storage;
use crate::model::note::format_date;
use crate::parse::{
    parse_checkbox, parse_date_link, parse_heading, parse_time_line, timestamp_markers,
};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::clock::Clock;

/// Render the note as lightly styled markdown, one source line per row.
pub fn render_preview<S: Storage, C: Clock>(frame: &mut Frame, app: &App<'_, S, C>, area: Rect) {
    let bg = Style::default().bg(app.theme.background);
    if app.note.content.trim().is_empty() {
        let message = if app.note.location.exists() {
            " (empty note)"
        } else {
            " (no note for this day)"
        };
        let empty = Paragraph::new(message).style(bg.fg(app.theme.dim));
        frame.render_widget(empty, area);
        return;
    }

    let lines: Vec<Line> = styled_lines(&app.note.content, &app.theme, area.width as usize)
        .into_iter()
        .skip(app.scroll)
        .take(area.height as usize)
        .collect();
    frame.render_widget(Paragraph::new(lines).style(bg), area);
}

/// Style each line of `content` by what it is: heading, check-in marker,
/// task, date-link, rule, code, or prose.
pub fn styled_lines(content: &str, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let base = Style::default().fg(theme.text).bg(theme.background);
    let mut in_code = false;
    let mut out = Vec::new();

    for line in content.lines() {
        if line.trim_start().starts_with("```") {
            in_code = !in_code;
            out.push(Line::from(Span::styled(line.to_string(), base.fg(theme.dim))));
            continue;
        }
        if in_code {
            out.push(Line::from(Span::styled(line.to_string(), base.fg(theme.yellow))));
            continue;
        }
        if line.trim() == "---" {
            out.push(Line::from(Span::styled(
                "\u{2500}".repeat(width),
                base.fg(theme.dim),
            )));
            continue;
        }
        if parse_heading(line).is_some() {
            out.push(Line::from(Span::styled(
                line.to_string(),
                base.fg(theme.highlight).add_modifier(Modifier::BOLD),
            )));
            continue;
        }
        if parse_time_line(line).is_some() {
            out.push(Line::from(Span::styled(
                line.to_string(),
                base.fg(theme.cyan).add_modifier(Modifier::BOLD),
            )));
            continue;
        }
        if let Some(date) = parse_date_link(line) {
            out.push(Line::from(Span::styled(
                format!("\u{21B3} {}", format_date(date)),
                base.fg(theme.blue).add_modifier(Modifier::UNDERLINED),
            )));
            continue;
        }
        if let Some(cb) = parse_checkbox(line) {
            let indent = &line[..line.len() - line.trim_start().len()];
            let (glyph, text_style) = if cb.completed {
                ("[x] ", base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT))
            } else {
                ("[ ] ", base.fg(theme.text_bright))
            };
            let glyph_color = if cb.completed { theme.green } else { theme.text };
            out.push(Line::from(vec![
                Span::styled(format!("{}- ", indent), base.fg(theme.dim)),
                Span::styled(glyph, base.fg(glyph_color)),
                Span::styled(cb.text.to_string(), text_style),
            ]));
            continue;
        }
        out.push(prose_line(line, theme, base));
    }
    out
}

/// Prose with inline `[HH:MM]` markers picked out.
fn prose_line(line: &str, theme: &Theme, base: Style) -> Line<'static> {
    let mut spans = Vec::new();
    let mut pos = 0;
    for marker in timestamp_markers(line) {
        if marker.range.start > pos {
            spans.push(Span::styled(line[pos..marker.range.start].to_string(), base));
        }
        spans.push(Span::styled(marker.text.to_string(), base.fg(theme.cyan)));
        pos = marker.range.end;
    }
    if pos < line.len() {
        spans.push(Span::styled(line[pos..].to_string(), base));
    }
    Line::from(spans)
}
