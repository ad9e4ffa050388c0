use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

/// Date format used for note file names, headings, and date-links.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Extension of every daily note file
pub const NOTE_EXTENSION: &str = "md";

/// `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// `YYYY-MM-DD.md`
pub fn note_file_name(date: NaiveDate) -> String {
    format!("{}.{}", format_date(date), NOTE_EXTENSION)
}

/// Where a note was found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteLocation {
    /// `root/YYYY/MM/YYYY-MM-DD.md`
    Organized(PathBuf),
    /// `root/YYYY-MM-DD.md`
    Flat(PathBuf),
    Missing,
}

impl NoteLocation {
    pub fn path(&self) -> Option<&Path> {
        match self {
            NoteLocation::Organized(p) | NoteLocation::Flat(p) => Some(p),
            NoteLocation::Missing => None,
        }
    }

    pub fn exists(&self) -> bool {
        !matches!(self, NoteLocation::Missing)
    }

    pub fn kind(&self) -> LocationKind {
        match self {
            NoteLocation::Organized(_) => LocationKind::Organized,
            NoteLocation::Flat(_) => LocationKind::Flat,
            NoteLocation::Missing => LocationKind::Missing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Organized,
    Flat,
    Missing,
}

/// A day's note as loaded for display.
#[derive(Debug, Clone)]
pub struct DailyNote {
    pub date: NaiveDate,
    /// Raw markdown; empty when the note doesn't exist
    pub content: String,
    pub location: NoteLocation,
}
