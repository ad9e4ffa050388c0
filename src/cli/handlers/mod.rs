use std::error::Error;
use std::path::Path;

use chrono::NaiveDate;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::editor::{open_in_editor, resolve_editor};
use crate::model::config::Config;
use crate::model::note::{format_date, parse_date};
use crate::ops::{Journal, NextPolicy, edit_today};
use crate::parse::parse_tasks;
use crate::tui;
use crate::tui::theme::Theme;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let json = cli.json;
    let (config, journal) = open_journal(cli.dir.as_deref())?;

    match cli.command.unwrap_or(Commands::Edit(EditArgs::default())) {
        Commands::Edit(args) => cmd_edit(&config, &journal, args, json),
        Commands::See(args) => cmd_see(&config, &journal, args),
        Commands::Do(args) => cmd_do(&config, &journal, args),
        Commands::Tasks(args) => cmd_tasks(&journal, args, json),
        Commands::Toggle(args) => cmd_toggle(&journal, args, json),
        Commands::Path(args) => cmd_path(&journal, args, json),
        Commands::Nav(args) => cmd_nav(&journal, args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the notes root. Nothing touches the disk until a command has
/// validated its arguments.
fn open_journal(dir: Option<&Path>) -> Result<(Config, Journal), ConfigError> {
    let config = config_io::load_config(dir)?;
    let journal = Journal::from_config(&config);
    tracing::debug!(root = %config.root.display(), "using notes directory");
    Ok((config, journal))
}

fn parse_day(value: &str) -> Result<NaiveDate, ConfigError> {
    parse_date(value).ok_or_else(|| ConfigError::InvalidDate(value.to_string()))
}

/// The day a command works on: `--date`, `--yester`, or today.
fn resolve_day(day: &DayArgs, journal: &Journal) -> Result<NaiveDate, ConfigError> {
    if day.yester {
        return Ok(journal.yesterday());
    }
    match &day.date {
        Some(value) => parse_day(value),
        None => Ok(journal.today()),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_edit(
    config: &Config,
    journal: &Journal,
    args: EditArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    journal.ensure_root()?;
    let outcome = if args.no_editor {
        edit_today(journal, |_| Ok(()))?
    } else {
        let editor = resolve_editor(&config.file.editor);
        edit_today(journal, |path| open_in_editor(&editor, path))?
    };

    if json {
        let out = CheckInJson {
            path: outcome.path.display().to_string(),
            check_in: check_in_label(outcome.check_in),
            separator_added: outcome.separator_added,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if args.no_editor {
        println!("{}", outcome.path.display());
    }
    Ok(())
}

fn cmd_see(config: &Config, journal: &Journal, args: SeeArgs) -> Result<(), Box<dyn Error>> {
    let date = resolve_day(&args.day, journal)?;
    journal.ensure_root()?;
    if args.print {
        let note = journal.load(date)?;
        print!("{}", note.content);
        return Ok(());
    }
    let editor = resolve_editor(&config.file.editor);
    tui::run_preview(journal, date, &editor, Theme::from_config(&config.file.ui))
}

fn cmd_do(config: &Config, journal: &Journal, args: DayArgs) -> Result<(), Box<dyn Error>> {
    let date = resolve_day(&args, journal)?;
    journal.ensure_root()?;
    tui::run_tasks(journal, date, Theme::from_config(&config.file.ui))
}

fn cmd_tasks(journal: &Journal, args: DayArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let date = resolve_day(&args, journal)?;
    journal.ensure_root()?;
    let note = journal.load(date)?;
    let tasks = parse_tasks(&note.content);

    if json {
        let out = TaskListJson {
            date: format_date(date),
            path: location_path(&note.location),
            tasks: &tasks,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("(no tasks for {})", format_date(date));
        return Ok(());
    }
    for line in format_task_listing(&tasks) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_toggle(journal: &Journal, args: ToggleArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let date = resolve_day(&args.day, journal)?;
    journal.ensure_root()?;
    let tasks = journal.tasks(date)?;
    let toggled = journal.toggle(date, args.id, &tasks)?;

    if json {
        let out = ToggleJson {
            id: args.id,
            toggled,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if toggled {
        // Ids are positional, so the same id names the same line after a toggle
        if let Some(task) = journal.tasks(date)?.iter().find(|t| t.id == args.id) {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_path(journal: &Journal, args: DayArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let date = resolve_day(&args, journal)?;
    let location = journal.locate(date);
    let path = match location.path() {
        Some(path) => path.to_path_buf(),
        None => journal.resolver().flat_path(date),
    };

    if json {
        let out = NotePathJson {
            date: format_date(date),
            path: path.display().to_string(),
            location: location.kind(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

fn cmd_nav(journal: &Journal, args: NavArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let from = match &args.date {
        Some(value) => parse_day(value)?,
        None => journal.today(),
    };
    let policy = if args.allow_today {
        NextPolicy::AllowToday
    } else {
        NextPolicy::MustExist
    };
    let found = match args.direction {
        NavDirection::Oldest => journal.oldest(),
        NavDirection::Prev => journal.previous(from),
        NavDirection::Next => journal.next(from, policy),
    };

    if json {
        let out = NavJson {
            from: format_date(from),
            date: found.map(format_date),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        match found {
            Some(date) => println!("{}", format_date(date)),
            None => println!("none"),
        }
    }
    Ok(())
}
