use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::cli::output::format_task_summary;
use crate::io::storage::Storage;
use crate::model::note::{LocationKind, format_date};
use crate::tui::app::{App, View};
use crate::util::clock::Clock;
use crate::util::unicode::display_width;

/// Render the title row (date, view tabs, note state) and a separator below.
pub fn render_title_bar<S: Storage, C: Clock>(frame: &mut Frame, app: &App<'_, S, C>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    frame.render_widget(Paragraph::new(title_line(app, area.width as usize)), chunks[0]);

    let sep = Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    );
    frame.render_widget(Paragraph::new(Line::from(sep)), chunks[1]);
}

fn title_line<S: Storage, C: Clock>(app: &App<'_, S, C>, width: usize) -> Line<'static> {
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let date = app.date();

    let mut spans = vec![
        Span::styled(" \u{25B6} ", bg.fg(theme.highlight)),
        Span::styled(
            format_date(date),
            bg.fg(theme.text_bright).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", date.format("%A")), bg.fg(theme.dim)),
    ];
    if app.is_today() {
        spans.push(Span::styled(" (today)", bg.fg(theme.green)));
    }
    spans.push(Span::styled("  \u{2502} ", bg.fg(theme.dim)));
    for (view, label) in [(View::Preview, "note"), (View::Tasks, "tasks")] {
        let style = if app.view == view {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            bg.fg(theme.dim)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
    }

    let right = match app.note.location.kind() {
        LocationKind::Missing => "no note".to_string(),
        kind => format!(
            "{}  {}",
            format_task_summary(&app.tasks),
            match kind {
                LocationKind::Organized => "archived",
                _ => "flat",
            }
        ),
    };
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let right_width = display_width(&right) + 1;
    if used + right_width < width {
        spans.push(Span::styled(" ".repeat(width - used - right_width), bg));
        spans.push(Span::styled(right, bg.fg(theme.dim)));
    }
    Line::from(spans)
}
