use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::editor::open_in_editor;
use crate::io::storage::{Storage, StorageError};
use crate::model::note::DailyNote;
use crate::model::task::{TaskItem, group_by_header};
use crate::ops::{Journal, NextPolicy, edit_today};
use crate::parse::parse_tasks;
use crate::util::clock::Clock;

use super::input;
use super::render;
use super::theme::Theme;

/// Which screen is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Rendered markdown of the note
    Preview,
    /// The note's tasks grouped under their headers
    Tasks,
}

/// Main application state
pub struct App<'a, S: Storage, C: Clock> {
    pub journal: &'a Journal<S, C>,
    pub view: View,
    pub theme: Theme,
    pub note: DailyNote,
    pub tasks: Vec<TaskItem>,
    /// Index into `task_order()`
    pub cursor: usize,
    /// First visible row of the content area
    pub scroll: usize,
    /// One-shot message for the status row; cleared on the next key
    pub status: Option<String>,
    pub should_quit: bool,
    /// Editor command for `e`; `None` disables editing
    pub editor: Option<String>,
    /// Set by `e`; the event loop suspends the terminal and runs the editor
    pub edit_requested: bool,
}

impl<'a, S: Storage, C: Clock> App<'a, S, C> {
    pub fn new(
        journal: &'a Journal<S, C>,
        view: View,
        date: NaiveDate,
        theme: Theme,
    ) -> Result<Self, StorageError> {
        let note = journal.load(date)?;
        let tasks = parse_tasks(&note.content);
        Ok(App {
            journal,
            view,
            theme,
            note,
            tasks,
            cursor: 0,
            scroll: 0,
            status: None,
            should_quit: false,
            editor: None,
            edit_requested: false,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.note.date
    }

    pub fn is_today(&self) -> bool {
        self.note.date == self.journal.today()
    }

    /// Re-read the current note from disk, keeping cursor and scroll in range.
    pub fn reload(&mut self) -> Result<(), StorageError> {
        self.note = self.journal.load(self.note.date)?;
        self.tasks = parse_tasks(&self.note.content);
        self.clamp_cursor();
        self.scroll = self.scroll.min(self.max_scroll());
        Ok(())
    }

    pub fn go_to(&mut self, date: NaiveDate) -> Result<(), StorageError> {
        self.note = self.journal.load(date)?;
        self.tasks = parse_tasks(&self.note.content);
        self.cursor = 0;
        self.scroll = 0;
        Ok(())
    }

    pub fn show_previous(&mut self) {
        match self.journal.previous(self.date()) {
            Some(date) => {
                let result = self.go_to(date);
                self.report(result);
            }
            None => self.status = Some("no earlier notes".into()),
        }
    }

    pub fn show_next(&mut self) {
        match self.journal.next(self.date(), NextPolicy::AllowToday) {
            Some(date) => {
                let result = self.go_to(date);
                self.report(result);
            }
            None => self.status = Some("no later notes".into()),
        }
    }

    pub fn request_edit(&mut self) {
        if !self.is_today() {
            self.status = Some("old notes cannot be edited".into());
        } else if self.editor.is_none() {
            self.status = Some("editing is not available here".into());
        } else {
            self.edit_requested = true;
        }
    }

    /// Task ids in the order they are drawn (grouped by header)
    pub fn task_order(&self) -> Vec<usize> {
        group_by_header(&self.tasks)
            .into_iter()
            .flat_map(|(_, items)| items.into_iter().map(|t| t.id))
            .collect()
    }

    pub fn selected_task(&self) -> Option<&TaskItem> {
        let id = *self.task_order().get(self.cursor)?;
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = self.cursor.saturating_add_signed(delta);
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.tasks.len().saturating_sub(1));
    }

    /// Toggle the selected task and re-read the note.
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id) else {
            return;
        };
        let result = match self.journal.toggle(self.date(), id, &self.tasks) {
            Ok(_) => self.reload(),
            Err(e) => Err(e),
        };
        self.report(result);
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta).min(self.max_scroll());
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn max_scroll(&self) -> usize {
        self.note.content.lines().count().saturating_sub(1)
    }

    pub fn switch_view(&mut self) {
        self.view = match self.view {
            View::Preview => View::Tasks,
            View::Tasks => View::Preview,
        };
        self.scroll = 0;
    }

    /// Show an I/O failure in the status row instead of leaving the screen.
    fn report(&mut self, result: Result<(), StorageError>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "note operation failed");
            self.status = Some(e.to_string());
        }
    }
}

/// Open the markdown preview on `date`.
pub fn run_preview<S: Storage, C: Clock>(
    journal: &Journal<S, C>,
    date: NaiveDate,
    editor: &str,
    theme: Theme,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(journal, View::Preview, date, theme)?;
    app.editor = Some(editor.to_string());
    run(&mut app)
}

/// Open the interactive task list on `date`.
pub fn run_tasks<S: Storage, C: Clock>(
    journal: &Journal<S, C>,
    date: NaiveDate,
    theme: Theme,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(journal, View::Tasks, date, theme)?;
    run(&mut app)
}

fn run<S: Storage, C: Clock>(app: &mut App<'_, S, C>) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop<S: Storage, C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<'_, S, C>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.edit_requested {
            app.edit_requested = false;
            run_editor(terminal, app)?;
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Hand the terminal to the editor for today's note, then take it back.
fn run_editor<S: Storage, C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<'_, S, C>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(editor) = app.editor.clone() else {
        return Ok(());
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    let outcome = edit_today(app.journal, |path| open_in_editor(&editor, path));

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()?;

    match outcome {
        Ok(_) => {
            let today = app.journal.today();
            let result = app.go_to(today);
            app.report(result);
            app.scroll_to_end();
        }
        Err(e) => app.status = Some(e.to_string()),
    }
    Ok(())
}
