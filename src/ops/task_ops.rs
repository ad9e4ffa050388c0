use std::path::Path;

use crate::io::storage::{Storage, StorageError};
use crate::model::task::TaskItem;
use crate::parse::{HeaderScope, ScopeLine, parse_checkbox};

/// Flip the checkbox of the first line matching `target`'s (text, header).
///
/// Returns `None` when no line matches. When the same pair appears more than
/// once, only the first occurrence in the file is toggled.
pub fn toggle_in_content(content: &str, target: &TaskItem) -> Option<String> {
    let mut scope = HeaderScope::default();
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();

    let mut hit = None;
    for (idx, line) in lines.iter().enumerate() {
        if scope.observe(line) != ScopeLine::Other {
            continue;
        }
        if let Some(cb) = parse_checkbox(line)
            && cb.text == target.text
            && scope.header() == target.header
        {
            hit = Some((idx, cb.glyph_at, cb.completed));
            break;
        }
    }

    let (idx, at, completed) = hit?;
    let glyph = if completed { " " } else { "x" };
    lines[idx].replace_range(at..at + 1, glyph);
    Some(lines.join("\n"))
}

/// Toggle task `id` from `tasks` (the list the caller last parsed from the
/// note at `path`) and write the note back.
///
/// Returns whether the file changed. Unknown ids are a silent no-op.
pub fn toggle_task<S: Storage + ?Sized>(
    storage: &S,
    path: &Path,
    id: usize,
    tasks: &[TaskItem],
) -> Result<bool, StorageError> {
    let Some(target) = tasks.iter().find(|t| t.id == id) else {
        tracing::debug!(id, "toggle requested for unknown task id");
        return Ok(false);
    };
    let Some(content) = storage.read_optional(path)? else {
        return Ok(false);
    };
    match toggle_in_content(&content, target) {
        Some(updated) => {
            storage.write(path, &updated)?;
            Ok(true)
        }
        None => {
            tracing::warn!(
                task = %target.text,
                header = %target.header,
                "task no longer found in note"
            );
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::FsStorage;
    use crate::parse::parse_tasks;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const NOTE: &str = "\
# 2025-11-19

## Home
- [ ] Water plants
- [x] Laundry

## Work
- [ ] Water plants
[10:30]
- [ ] Water plants
";

    #[test]
    fn toggles_by_structure_not_position() {
        let tasks = parse_tasks(NOTE);
        // Second "Water plants" is under Work
        let updated = toggle_in_content(NOTE, &tasks[2]).unwrap();
        let after = parse_tasks(&updated);
        assert!(!after[0].completed);
        assert!(after[2].completed);
        assert!(!after[3].completed);
    }

    #[test]
    fn time_marker_scope_matches_general_tasks() {
        let tasks = parse_tasks(NOTE);
        assert_eq!(tasks[3].header, "");
        let updated = toggle_in_content(NOTE, &tasks[3]).unwrap();
        assert!(updated.ends_with("[10:30]\n- [x] Water plants\n"));
    }

    #[test]
    fn unchecks_completed_task() {
        let tasks = parse_tasks(NOTE);
        let updated = toggle_in_content(NOTE, &tasks[1]).unwrap();
        assert!(updated.contains("- [ ] Laundry"));
    }

    #[test]
    fn duplicate_pairs_toggle_first_occurrence() {
        let note = "## A\n- [ ] same\n- [ ] same\n";
        let tasks = parse_tasks(note);
        let updated = toggle_in_content(note, &tasks[1]).unwrap();
        assert_eq!(updated, "## A\n- [x] same\n- [ ] same\n");
    }

    #[test]
    fn preserves_indentation_and_other_lines() {
        let note = "Intro\n    - [ ] deep task\nOutro";
        let tasks = parse_tasks(note);
        let updated = toggle_in_content(note, &tasks[0]).unwrap();
        assert_eq!(updated, "Intro\n    - [x] deep task\nOutro");
    }

    #[test]
    fn toggle_round_trip_on_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("2025-11-19.md");
        fs::write(&path, NOTE).unwrap();
        let tasks = parse_tasks(NOTE);

        assert!(toggle_task(&FsStorage, &path, 0, &tasks).unwrap());
        let after = parse_tasks(&fs::read_to_string(&path).unwrap());
        assert!(after[0].completed);
        for (a, b) in tasks.iter().zip(&after).skip(1) {
            assert_eq!(a.completed, b.completed);
        }
    }

    #[test]
    fn unknown_id_is_silent_noop() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("2025-11-19.md");
        fs::write(&path, NOTE).unwrap();
        let tasks = parse_tasks(NOTE);
        assert!(!toggle_task(&FsStorage, &path, 99, &tasks).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), NOTE);
    }

    #[test]
    fn vanished_task_leaves_file_alone() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("2025-11-19.md");
        let tasks = parse_tasks(NOTE);
        fs::write(&path, "# rewritten elsewhere\n").unwrap();
        assert!(!toggle_task(&FsStorage, &path, 0, &tasks).unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# rewritten elsewhere\n"
        );
    }
}
