use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::Storage;
use crate::model::task::group_by_header;
use crate::tui::app::App;
use crate::util::clock::Clock;
use crate::util::unicode::{padding_for, truncate_to_width};

/// Render tasks grouped under their headers, with the cursor row
/// highlighted. Adjusts `app.scroll` so the cursor stays visible.
pub fn render_task_list<S: Storage, C: Clock>(
    frame: &mut Frame,
    app: &mut App<'_, S, C>,
    area: Rect,
) {
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    if app.tasks.is_empty() {
        let empty = Paragraph::new(" No tasks").style(bg.fg(theme.dim));
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width as usize;
    let mut rows: Vec<Line> = Vec::new();
    let mut cursor_row = 0;
    let mut position = 0;

    for (i, (header, items)) in group_by_header(&app.tasks).into_iter().enumerate() {
        if i > 0 {
            rows.push(Line::from(""));
        }
        rows.push(Line::from(Span::styled(
            format!(" {}", truncate_to_width(&header, width.saturating_sub(1))),
            bg.fg(theme.highlight).add_modifier(Modifier::BOLD),
        )));

        for task in items {
            let selected = position == app.cursor;
            if selected {
                cursor_row = rows.len();
            }
            position += 1;

            let row_bg = if selected {
                theme.selection_bg
            } else {
                theme.background
            };
            let glyph = format!("   {} ", task.checkbox());
            let text = truncate_to_width(&task.text, width.saturating_sub(glyph.len()));
            let mut text_style = Style::default().bg(row_bg);
            text_style = if task.completed {
                text_style.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
            } else {
                text_style.fg(theme.text_bright)
            };
            let glyph_color = if task.completed { theme.green } else { theme.text };

            let mut spans = vec![
                Span::styled(glyph.clone(), Style::default().fg(glyph_color).bg(row_bg)),
                Span::styled(text.clone(), text_style),
            ];
            if selected {
                let used = format!("{}{}", glyph, text);
                spans.push(Span::styled(
                    " ".repeat(padding_for(&used, width)),
                    Style::default().bg(row_bg),
                ));
            }
            rows.push(Line::from(spans));
        }
    }

    let height = area.height as usize;
    if cursor_row < app.scroll {
        app.scroll = cursor_row;
    } else if height > 0 && cursor_row >= app.scroll + height {
        app.scroll = cursor_row + 1 - height;
    }

    let visible: Vec<Line> = rows.into_iter().skip(app.scroll).take(height).collect();
    frame.render_widget(Paragraph::new(visible).style(bg), area);
}
