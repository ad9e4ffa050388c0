use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::storage::Storage;
use crate::util::clock::Clock;

use super::app::{App, View};

/// Handle a key press. Any key clears the previous status message.
pub fn handle_key<S: Storage, C: Clock>(app: &mut App<'_, S, C>, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status = None;

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => app.should_quit = true,
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => app.show_previous(),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => app.show_next(),
        (KeyCode::Tab, _) => app.switch_view(),
        _ => match app.view {
            View::Preview => handle_preview(app, key),
            View::Tasks => handle_tasks(app, key),
        },
    }
}

fn handle_preview<S: Storage, C: Clock>(app: &mut App<'_, S, C>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_by(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_by(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_by(10),
        KeyCode::PageUp => app.scroll_by(-10),
        KeyCode::Char('g') | KeyCode::Home => app.scroll = 0,
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_end(),
        KeyCode::Char('e') => app.request_edit(),
        _ => {}
    }
}

fn handle_tasks<S: Storage, C: Clock>(app: &mut App<'_, S, C>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.move_cursor(isize::MAX),
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('x') => app.toggle_selected(),
        _ => {}
    }
}
