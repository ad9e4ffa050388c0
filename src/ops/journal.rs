use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::io::paths::PathResolver;
use crate::io::storage::{FsStorage, Storage, StorageError};
use crate::model::config::Config;
use crate::model::note::{DailyNote, NoteLocation};
use crate::model::task::TaskItem;
use crate::ops::carry_over::create_day_note;
use crate::ops::navigation::{Navigator, NextPolicy};
use crate::ops::punctuate::punctuate_after_edit;
use crate::ops::task_ops::toggle_task;
use crate::ops::timestamp::{CheckIn, append_or_replace_timestamp};
use crate::parse::parse_tasks;
use crate::util::clock::{Clock, SystemClock};

/// The notes archive: storage, layout, and "now" bundled together.
pub struct Journal<S: Storage = FsStorage, C: Clock = SystemClock> {
    storage: S,
    resolver: PathResolver,
    clock: C,
    window_days: u32,
}

impl Journal {
    /// A filesystem-backed journal on the wall clock.
    pub fn from_config(config: &Config) -> Self {
        Journal::new(
            FsStorage,
            PathResolver::new(&config.root),
            SystemClock,
            config.file.navigation.search_window_days,
        )
    }
}

impl<S: Storage, C: Clock> Journal<S, C> {
    pub fn new(storage: S, resolver: PathResolver, clock: C, window_days: u32) -> Self {
        Journal {
            storage,
            resolver,
            clock,
            window_days,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn yesterday(&self) -> NaiveDate {
        let today = self.today();
        today.pred_opt().unwrap_or(today)
    }

    pub fn ensure_root(&self) -> Result<(), StorageError> {
        self.storage.ensure_dir(self.resolver.root())
    }

    pub fn locate(&self, date: NaiveDate) -> NoteLocation {
        self.resolver.resolve_existing(&self.storage, date)
    }

    /// Path of today's note, creating and seeding it on first access.
    pub fn ensure_today(&self) -> Result<PathBuf, StorageError> {
        let today = self.today();
        if let Some(path) = self.locate(today).path() {
            return Ok(path.to_path_buf());
        }
        self.ensure_root()?;
        create_day_note(&self.storage, &self.resolver, today)
    }

    /// Load a day's note. Today's note is created when absent; other
    /// missing days load as empty without touching the disk.
    pub fn load(&self, date: NaiveDate) -> Result<DailyNote, StorageError> {
        if date == self.today() {
            self.ensure_today()?;
        }
        let location = self.locate(date);
        let content = match location.path() {
            Some(path) => self.storage.read_optional(path)?.unwrap_or_default(),
            None => String::new(),
        };
        Ok(DailyNote {
            date,
            content,
            location,
        })
    }

    /// Tasks of a loaded note
    pub fn tasks(&self, date: NaiveDate) -> Result<Vec<TaskItem>, StorageError> {
        Ok(parse_tasks(&self.load(date)?.content))
    }

    /// Check in on today's note.
    pub fn check_in(&self) -> Result<(PathBuf, CheckIn), StorageError> {
        let path = self.ensure_today()?;
        let action = append_or_replace_timestamp(&self.storage, &path, &self.clock.time_string())?;
        Ok((path, action))
    }

    pub fn read(&self, path: &Path) -> Result<String, StorageError> {
        Ok(self.storage.read_optional(path)?.unwrap_or_default())
    }

    pub fn punctuate(&self, path: &Path, before: &str, after: &str) -> Result<bool, StorageError> {
        punctuate_after_edit(&self.storage, path, before, after)
    }

    /// Toggle a task on `date`'s note. Returns whether the file changed.
    pub fn toggle(
        &self,
        date: NaiveDate,
        id: usize,
        tasks: &[TaskItem],
    ) -> Result<bool, StorageError> {
        match self.locate(date).path() {
            Some(path) => toggle_task(&self.storage, path, id, tasks),
            None => Ok(false),
        }
    }

    pub fn navigator(&self) -> Navigator<'_, S> {
        Navigator::new(&self.storage, &self.resolver, self.today(), self.window_days)
    }

    pub fn oldest(&self) -> Option<NaiveDate> {
        self.navigator().find_oldest()
    }

    pub fn previous(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.navigator().find_previous(date)
    }

    pub fn next(&self, date: NaiveDate, policy: NextPolicy) -> Option<NaiveDate> {
        self.navigator().find_next(date, policy)
    }
}
