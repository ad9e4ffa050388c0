use std::path::Path;

use crate::io::storage::{Storage, StorageError};
use crate::parse::{last_timestamp, timestamp_markers, with_single_trailing_newline};

/// Appended after a journaling session
pub const SEPARATOR: &str = "\n---\n\n";

/// Did the edit add text below the last check-in marker?
///
/// Only answers yes when both snapshots have the same number of markers and
/// the same last marker; anything else is ambiguous and answers no.
pub fn content_added_below_last_timestamp(before: &str, after: &str) -> bool {
    if timestamp_markers(before).len() != timestamp_markers(after).len() {
        return false;
    }
    let (Some(last_before), Some(last_after)) = (last_timestamp(before), last_timestamp(after))
    else {
        return false;
    };
    if last_before.text != last_after.text {
        return false;
    }
    let tail_before = before[last_before.range.end..].trim();
    let tail_after = after[last_after.range.end..].trim();
    tail_after.chars().count() > tail_before.chars().count()
}

/// After an editor session, close off what was journaled with a separator.
///
/// Returns whether the note was rewritten. Nothing is written when no
/// addition is detected or the note already ends with the separator.
pub fn punctuate_after_edit<S: Storage + ?Sized>(
    storage: &S,
    path: &Path,
    before: &str,
    after: &str,
) -> Result<bool, StorageError> {
    if !content_added_below_last_timestamp(before, after) {
        return Ok(false);
    }
    if after.ends_with(SEPARATOR) {
        return Ok(false);
    }
    let current = storage.read_optional(path)?;
    if current.as_deref().is_some_and(|c| c.ends_with(SEPARATOR)) {
        return Ok(false);
    }

    let mut updated = with_single_trailing_newline(after);
    updated.push_str(SEPARATOR);
    tracing::debug!(path = %path.display(), "closing session with separator");
    storage.write(path, &updated)?;
    Ok(true)
}
