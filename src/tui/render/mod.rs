pub mod preview;
pub mod status_row;
pub mod task_list;
pub mod title_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::io::storage::Storage;
use crate::util::clock::Clock;

use super::app::{App, View};

/// Main render function: title bar, current view, status row
pub fn render<S: Storage, C: Clock>(frame: &mut Frame, app: &mut App<'_, S, C>) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    title_bar::render_title_bar(frame, app, chunks[0]);
    match app.view {
        View::Preview => preview::render_preview(frame, app, chunks[1]),
        View::Tasks => task_list::render_task_list(frame, app, chunks[1]),
    }
    status_row::render_status_row(frame, app, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{fixture_journal, write_note};
    use crate::tui::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    #[test]
    fn full_screen_shows_note_and_hints() {
        let tmp = TempDir::new().unwrap();
        let date = write_note(
            tmp.path(),
            "2025-11-18",
            "# 2025-11-18\n[09:00]\nStandup notes.\n",
        );
        let j = fixture_journal(tmp.path());
        let mut app = App::new(&j, View::Preview, date, Theme::default()).unwrap();
        app.status = Some("old notes cannot be edited".into());

        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let rows: Vec<String> = buf
            .content
            .chunks(80)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect();

        assert!(rows[0].contains("2025-11-18 Tuesday"));
        assert_eq!(rows[2].trim_end(), "# 2025-11-18");
        assert_eq!(rows[3].trim_end(), "[09:00]");
        assert_eq!(rows[4].trim_end(), "Standup notes.");
        assert!(rows[9].starts_with(" old notes cannot be edited"));
        assert!(rows[9].trim_end().ends_with("q quit"));
    }
}
