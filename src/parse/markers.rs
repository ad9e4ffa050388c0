//! Line-level recognizers for the few markdown shapes a daily note cares
//! about: `[HH:MM]` check-in markers, headings, checkbox tasks, and
//! `[YYYY-MM-DD](YYYY-MM-DD.md)` date-links.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::model::note::{format_date, note_file_name, parse_date};

static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[0-9]{2}:[0-9]{2}\]").expect("static regex"));

static TIME_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([0-9]{2}:[0-9]{2})\]$").expect("static regex"));

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.+)$").expect("static regex"));

static TASK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s+\[([ x])\]\s+(.+)$").expect("static regex"));

static DATE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[([0-9]{4}-[0-9]{2}-[0-9]{2})\]\([0-9]{4}-[0-9]{2}-[0-9]{2}\.md\)\s*$").expect("static regex")
});

/// A `[HH:MM]` marker found in note content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampMarker<'a> {
    /// Byte range of the marker, brackets included
    pub range: Range<usize>,
    /// The marker text, e.g. `[10:30]`
    pub text: &'a str,
}

/// Every `[HH:MM]`-shaped substring, in order.
pub fn timestamp_markers(content: &str) -> Vec<TimestampMarker<'_>> {
    TIMESTAMP_RE
        .find_iter(content)
        .map(|m| TimestampMarker {
            range: m.range(),
            text: m.as_str(),
        })
        .collect()
}

/// The last `[HH:MM]` marker, the only one that matters for check-ins.
pub fn last_timestamp(content: &str) -> Option<TimestampMarker<'_>> {
    TIMESTAMP_RE.find_iter(content).last().map(|m| TimestampMarker {
        range: m.range(),
        text: m.as_str(),
    })
}

/// `[HH:MM]` for a bare `HH:MM` time
pub fn format_timestamp(time: &str) -> String {
    format!("[{}]", time)
}

/// A line that is only a time marker: returns `HH:MM`.
pub fn parse_time_line(line: &str) -> Option<&str> {
    TIME_LINE_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// A `#`..`######` heading: returns its trimmed text.
pub fn parse_heading(line: &str) -> Option<&str> {
    HEADING_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// A parsed `- [ ] text` / `- [x] text` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox<'a> {
    pub completed: bool,
    /// Trimmed task text
    pub text: &'a str,
    /// Byte offset of the glyph inside the brackets
    pub glyph_at: usize,
}

pub fn parse_checkbox(line: &str) -> Option<Checkbox<'_>> {
    let caps = TASK_RE.captures(line)?;
    let glyph = caps.get(1)?;
    let text = caps.get(2)?;
    Some(Checkbox {
        completed: glyph.as_str() == "x",
        text: text.as_str().trim(),
        glyph_at: glyph.start(),
    })
}

/// A line holding only a date-link: returns the linked date.
pub fn parse_date_link(line: &str) -> Option<NaiveDate> {
    let caps = DATE_LINK_RE.captures(line)?;
    parse_date(caps.get(1)?.as_str())
}

/// `[YYYY-MM-DD](YYYY-MM-DD.md)`
pub fn format_date_link(date: NaiveDate) -> String {
    format!("[{}]({})", format_date(date), note_file_name(date))
}

/// `content` with any trailing newlines collapsed to exactly one.
pub fn with_single_trailing_newline(content: &str) -> String {
    let mut out = content.trim_end_matches('\n').to_string();
    out.push('\n');
    out
}
