use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::io::storage::Storage;
use crate::model::note::{NoteLocation, note_file_name};

/// Computes where a day's note lives under the notes root.
///
/// Recent notes sit flat in the root; once a later day's note is created
/// they move under `YYYY/MM/`. Lookups check the organized location first.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PathResolver { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `root/YYYY-MM-DD.md`
    pub fn flat_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join(note_file_name(date))
    }

    /// `root/YYYY/MM`
    pub fn organized_dir(&self, date: NaiveDate) -> PathBuf {
        self.root
            .join(format!("{:04}", date.year()))
            .join(format!("{:02}", date.month()))
    }

    /// `root/YYYY/MM/YYYY-MM-DD.md`
    pub fn organized_path(&self, date: NaiveDate) -> PathBuf {
        self.organized_dir(date).join(note_file_name(date))
    }

    /// First existing location wins, organized before flat.
    pub fn resolve_existing<S: Storage + ?Sized>(
        &self,
        storage: &S,
        date: NaiveDate,
    ) -> NoteLocation {
        let organized = self.organized_path(date);
        if storage.exists(&organized) {
            return NoteLocation::Organized(organized);
        }
        let flat = self.flat_path(date);
        if storage.exists(&flat) {
            return NoteLocation::Flat(flat);
        }
        NoteLocation::Missing
    }
}
