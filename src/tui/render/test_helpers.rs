use std::path::Path;

use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::paths::PathResolver;
use crate::io::storage::FsStorage;
use crate::model::note::parse_date;
use crate::ops::Journal;
use crate::util::clock::FixedClock;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A journal over `root` whose clock reads 2025-11-19 14:30.
pub fn fixture_journal(root: &Path) -> Journal<FsStorage, FixedClock> {
    Journal::new(
        FsStorage,
        PathResolver::new(root),
        FixedClock::at(2025, 11, 19, 14, 30).unwrap(),
        365,
    )
}

/// Write a flat note for `date` (`YYYY-MM-DD`) under `root`.
pub fn write_note(root: &Path, date: &str, content: &str) -> NaiveDate {
    std::fs::write(root.join(format!("{}.md", date)), content).unwrap();
    parse_date(date).unwrap()
}
