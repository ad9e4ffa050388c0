use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::Storage;
use crate::tui::app::{App, View};
use crate::util::clock::Clock;
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen): message on the left, key
/// hints on the right.
pub fn render_status_row<S: Storage, C: Clock>(frame: &mut Frame, app: &App<'_, S, C>, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    if let Some(ref message) = app.status {
        spans.push(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.yellow).bg(bg),
        ));
    }

    let hint = match app.view {
        View::Preview => "h/l day  j/k scroll  e edit  tab tasks  q quit ",
        View::Tasks => "h/l day  j/k move  space toggle  tab note  q quit ",
    };
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
