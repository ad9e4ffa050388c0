use std::path::{Path, PathBuf};

use crate::io::editor::EditorError;
use crate::io::storage::{Storage, StorageError};
use crate::ops::journal::Journal;
use crate::ops::timestamp::CheckIn;
use crate::util::clock::Clock;

/// Error type for an editing session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// What one editing session did to today's note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub path: PathBuf,
    pub check_in: CheckIn,
    pub separator_added: bool,
}

/// Check in on today's note, hand it to `launch`, then punctuate whatever
/// was written below the check-in.
///
/// `launch` blocks until the edit is finished. The "before" snapshot is
/// taken after the timestamp lands, so the marker itself never counts as
/// new content.
pub fn edit_today<S, C, F>(journal: &Journal<S, C>, launch: F) -> Result<SessionOutcome, SessionError>
where
    S: Storage,
    C: Clock,
    F: FnOnce(&Path) -> Result<(), EditorError>,
{
    let (path, check_in) = journal.check_in()?;
    let before = journal.read(&path)?;
    launch(&path)?;
    let after = journal.read(&path)?;
    let separator_added = journal.punctuate(&path, &before, &after)?;
    tracing::info!(
        path = %path.display(),
        ?check_in,
        separator_added,
        "editing session finished"
    );
    Ok(SessionOutcome {
        path,
        check_in,
        separator_added,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::paths::PathResolver;
    use crate::io::storage::FsStorage;
    use crate::util::clock::FixedClock;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn journal(tmp: &TempDir) -> Journal<FsStorage, FixedClock> {
        Journal::new(
            FsStorage,
            PathResolver::new(tmp.path()),
            FixedClock::at(2025, 11, 19, 9, 15).unwrap(),
            365,
        )
    }

    #[test]
    fn writing_below_the_marker_adds_a_separator() {
        let tmp = TempDir::new().unwrap();
        let j = journal(&tmp);
        let outcome = edit_today(&j, |path| {
            let mut content = fs::read_to_string(path).unwrap();
            content.push_str("Met with the team.\n");
            fs::write(path, content).unwrap();
            Ok(())
        })
        .unwrap();
        assert_eq!(outcome.check_in, CheckIn::Appended);
        assert!(outcome.separator_added);
        assert_eq!(
            fs::read_to_string(&outcome.path).unwrap(),
            "# 2025-11-19\n[09:15]\nMet with the team.\n\n---\n\n"
        );
    }

    #[test]
    fn closing_without_changes_leaves_only_the_marker() {
        let tmp = TempDir::new().unwrap();
        let j = journal(&tmp);
        let outcome = edit_today(&j, |_| Ok(())).unwrap();
        assert!(!outcome.separator_added);
        assert_eq!(
            fs::read_to_string(&outcome.path).unwrap(),
            "# 2025-11-19\n[09:15]\n"
        );
    }

    #[test]
    fn editor_failure_surfaces_after_check_in() {
        let tmp = TempDir::new().unwrap();
        let j = journal(&tmp);
        let err = edit_today(&j, |_| {
            Err(EditorError::Exit {
                command: "false".into(),
                code: 1,
            })
        })
        .unwrap_err();
        assert!(matches!(err, SessionError::Editor(_)));
        let path = j.resolver().flat_path(j.today());
        assert_eq!(fs::read_to_string(path).unwrap(), "# 2025-11-19\n[09:15]\n");
    }
}
