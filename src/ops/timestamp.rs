use std::path::Path;

use crate::io::storage::{Storage, StorageError};
use crate::parse::{format_timestamp, last_timestamp, with_single_trailing_newline};

/// What a check-in did to the note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckIn {
    /// Note was empty; it now holds only the marker
    Started,
    /// A new marker line went at the end
    Appended,
    /// Nothing was written since the last marker, so it was bumped in place
    Replaced,
}

/// Apply a check-in at `time` (`HH:MM`) to `content`.
pub fn apply_timestamp(content: &str, time: &str) -> (String, CheckIn) {
    let marker = format_timestamp(time);

    if content.is_empty() {
        return (format!("{}\n", marker), CheckIn::Started);
    }

    if let Some(last) = last_timestamp(content)
        && content[last.range.end..].trim().is_empty()
    {
        let mut out = String::with_capacity(content.len());
        out.push_str(&content[..last.range.start]);
        out.push_str(&marker);
        out.push_str(&content[last.range.end..]);
        return (out, CheckIn::Replaced);
    }

    let mut out = with_single_trailing_newline(content);
    out.push_str(&marker);
    out.push('\n');
    (out, CheckIn::Appended)
}

/// Append a fresh `[HH:MM]` marker to the note at `path`, or bump the last
/// one if nothing was written after it. A missing note counts as empty.
pub fn append_or_replace_timestamp<S: Storage + ?Sized>(
    storage: &S,
    path: &Path,
    time: &str,
) -> Result<CheckIn, StorageError> {
    let content = storage.read_optional(path)?.unwrap_or_default();
    let (updated, action) = apply_timestamp(&content, time);
    tracing::debug!(path = %path.display(), ?action, time, "check-in");
    storage.write(path, &updated)?;
    Ok(action)
}
