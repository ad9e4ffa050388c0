//! Seeding a new day's note with the unfinished tasks of the days before it.
//!
//! Carried tasks sit under a date-link naming the day they came from:
//!
//! ```text
//! # 2025-11-19
//!
//! [2025-11-18](2025-11-18.md)
//!
//! - [ ] Call the bank
//!
//! ---
//! ```
//!
//! Following those links backwards forms a chain through older notes. The
//! walk over that chain uses an explicit stack and a visited-date set, so
//! cycles and long chains cost neither correctness nor stack depth.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::io::paths::PathResolver;
use crate::io::storage::{Storage, StorageError};
use crate::model::note::format_date;
use crate::parse::{format_date_link, parse_checkbox, parse_date_link};

/// Unfinished tasks carried from one source date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub date: NaiveDate,
    /// Trimmed task texts, without the `- [ ] ` prefix
    pub tasks: Vec<String>,
}

impl Bucket {
    fn new(date: NaiveDate) -> Self {
        Bucket {
            date,
            tasks: Vec::new(),
        }
    }
}

/// One note being scanned during the chain walk
struct Frame {
    lines: Vec<String>,
    pos: usize,
    bucket: Bucket,
}

impl Frame {
    fn new(date: NaiveDate, content: &str) -> Self {
        Frame {
            lines: content.split('\n').map(str::to_string).collect(),
            pos: 0,
            bucket: Bucket::new(date),
        }
    }
}

/// Move yesterday's flat note under `YYYY/MM/`.
///
/// Returns whether a move happened. A no-op when the flat note is absent
/// (already moved, or never written). If an organized copy already exists
/// the flat file is left alone rather than overwriting it.
pub fn relocate_note<S: Storage + ?Sized>(
    storage: &S,
    resolver: &PathResolver,
    date: NaiveDate,
) -> Result<bool, StorageError> {
    let flat = resolver.flat_path(date);
    if !storage.exists(&flat) {
        return Ok(false);
    }
    let target = resolver.organized_path(date);
    if storage.exists(&target) {
        tracing::warn!(
            from = %flat.display(),
            to = %target.display(),
            "organized note already exists, leaving flat note in place"
        );
        return Ok(false);
    }
    storage.ensure_dir(&resolver.organized_dir(date))?;
    storage.move_file(&flat, &target)?;
    tracing::info!(from = %flat.display(), to = %target.display(), "archived note");
    Ok(true)
}

/// Collect unfinished tasks from the note for `start` and every note
/// reachable from it through date-links.
///
/// Each scanned note opens with a bucket for its own date; a date-link line
/// closes the current bucket and opens one for the linked date. A linked
/// note is scanned (once) before the rest of the linking note, so its
/// buckets come first. Buckets stay in discovery order, and every open
/// task line lands in the bucket active where it was read.
pub fn harvest_unfinished<S: Storage + ?Sized>(
    storage: &S,
    resolver: &PathResolver,
    start: NaiveDate,
) -> Result<Vec<Bucket>, StorageError> {
    let mut visited = HashSet::from([start]);
    let mut stack = Vec::new();
    if let Some(content) = read_note(storage, resolver, start)? {
        stack.push(Frame::new(start, &content));
    }

    let mut buckets: Vec<Bucket> = Vec::new();

    while let Some(frame) = stack.last_mut() {
        let Some(line) = frame.lines.get(frame.pos) else {
            if let Some(done) = stack.pop() {
                close_bucket(&mut buckets, done.bucket);
            }
            continue;
        };
        frame.pos += 1;

        if let Some(linked) = parse_date_link(line) {
            if frame
                .lines
                .get(frame.pos)
                .is_some_and(|l| l.trim().is_empty())
            {
                frame.pos += 1;
            }
            let closed = std::mem::replace(&mut frame.bucket, Bucket::new(linked));
            close_bucket(&mut buckets, closed);

            if visited.insert(linked)
                && let Some(content) = read_note(storage, resolver, linked)?
            {
                tracing::debug!(date = %linked, "following date-link");
                stack.push(Frame::new(linked, &content));
            }
            continue;
        }

        if let Some(cb) = parse_checkbox(line)
            && !cb.completed
        {
            frame.bucket.tasks.push(cb.text.to_string());
        }
    }
    Ok(buckets)
}

fn close_bucket(buckets: &mut Vec<Bucket>, bucket: Bucket) {
    if !bucket.tasks.is_empty() {
        buckets.push(bucket);
    }
}

fn read_note<S: Storage + ?Sized>(
    storage: &S,
    resolver: &PathResolver,
    date: NaiveDate,
) -> Result<Option<String>, StorageError> {
    match resolver.resolve_existing(storage, date).path() {
        Some(path) => storage.read_optional(path),
        None => Ok(None),
    }
}

/// Seed content for `today`: a heading, then each bucket under its
/// date-link, then a separator if anything was carried.
pub fn render_seed(today: NaiveDate, buckets: &[Bucket]) -> String {
    let mut out = format!("# {}\n\n", format_date(today));
    for bucket in buckets {
        out.push_str(&format_date_link(bucket.date));
        out.push_str("\n\n");
        for task in &bucket.tasks {
            out.push_str("- [ ] ");
            out.push_str(task);
            out.push('\n');
        }
        out.push('\n');
    }
    if !buckets.is_empty() {
        out.push_str("---\n\n");
    }
    out
}

/// Create today's note: archive yesterday's flat note, then write the seed.
///
/// Not atomic across the two steps; rerunning after a failure in between is
/// safe because the move is a no-op once done.
pub fn create_day_note<S: Storage + ?Sized>(
    storage: &S,
    resolver: &PathResolver,
    today: NaiveDate,
) -> Result<PathBuf, StorageError> {
    let path = resolver.flat_path(today);
    let buckets = match today.pred_opt() {
        Some(yesterday) => {
            relocate_note(storage, resolver, yesterday)?;
            harvest_unfinished(storage, resolver, yesterday)?
        }
        None => Vec::new(),
    };
    let carried: usize = buckets.iter().map(|b| b.tasks.len()).sum();
    storage.write(&path, &render_seed(today, &buckets))?;
    tracing::info!(path = %path.display(), carried, "created daily note");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::FsStorage;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_flat(resolver: &PathResolver, d: NaiveDate, content: &str) {
        fs::write(resolver.flat_path(d), content).unwrap();
    }

    fn write_organized(resolver: &PathResolver, d: NaiveDate, content: &str) {
        fs::create_dir_all(resolver.organized_dir(d)).unwrap();
        fs::write(resolver.organized_path(d), content).unwrap();
    }

    #[test]
    fn seed_without_tasks_is_just_heading() {
        assert_eq!(render_seed(date(2025, 11, 19), &[]), "# 2025-11-19\n\n");
    }

    #[test]
    fn seed_layout() {
        let buckets = vec![Bucket {
            date: date(2025, 11, 18),
            tasks: vec!["A".into(), "C".into()],
        }];
        assert_eq!(
            render_seed(date(2025, 11, 19), &buckets),
            "# 2025-11-19\n\n[2025-11-18](2025-11-18.md)\n\n- [ ] A\n- [ ] C\n\n---\n\n"
        );
    }

    #[test]
    fn harvest_missing_start_is_empty() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let got = harvest_unfinished(&FsStorage, &resolver, date(2025, 11, 18)).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn harvest_drops_completed_and_normalizes() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let d = date(2025, 11, 18);
        write_flat(
            &resolver,
            d,
            "# 2025-11-18\n\n## Tasks\n- [x] Done\n  - [ ]   Indented  \n- [ ] Plain\n",
        );
        let got = harvest_unfinished(&FsStorage, &resolver, d).unwrap();
        assert_eq!(
            got,
            vec![Bucket {
                date: d,
                tasks: vec!["Indented".into(), "Plain".into()],
            }]
        );
    }

    #[test]
    fn linked_ancestor_comes_first() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let d17 = date(2025, 11, 17);
        let d18 = date(2025, 11, 18);
        write_organized(
            &resolver,
            d17,
            "# 2025-11-17\n\n- [ ] Task from three days ago\n- [x] Completed task from three days ago\n",
        );
        write_flat(
            &resolver,
            d18,
            "\
# 2025-11-18

- [ ] Own task first

[2025-11-17](2025-11-17.md)

- [ ] Task from two days ago
- [x] Completed task from two days ago

- [ ] Task from yesterday
",
        );
        let got = harvest_unfinished(&FsStorage, &resolver, d18).unwrap();
        assert_eq!(
            got,
            vec![
                Bucket {
                    date: d18,
                    tasks: vec!["Own task first".into()],
                },
                Bucket {
                    date: d17,
                    tasks: vec!["Task from three days ago".into()],
                },
                Bucket {
                    date: d17,
                    tasks: vec![
                        "Task from two days ago".into(),
                        "Task from yesterday".into()
                    ],
                },
            ]
        );
    }

    #[test]
    fn cycles_terminate() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let a = date(2025, 11, 17);
        let b = date(2025, 11, 18);
        write_flat(&resolver, a, "[2025-11-18](2025-11-18.md)\n\n- [ ] from a\n");
        write_flat(&resolver, b, "[2025-11-17](2025-11-17.md)\n\n- [ ] from b\n");
        let got = harvest_unfinished(&FsStorage, &resolver, b).unwrap();
        let all: Vec<&str> = got
            .iter()
            .flat_map(|b| b.tasks.iter().map(String::as_str))
            .collect();
        assert_eq!(all, vec!["from a", "from b"]);
    }

    #[test]
    fn same_text_under_two_headings_is_carried_twice() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let d18 = date(2025, 11, 18);
        write_flat(&resolver, d18, "## Work\n- [ ] Call Sam\n## Home\n- [ ] Call Sam\n");
        let got = harvest_unfinished(&FsStorage, &resolver, d18).unwrap();
        assert_eq!(
            got,
            vec![Bucket {
                date: d18,
                tasks: vec!["Call Sam".into(), "Call Sam".into()],
            }]
        );
    }

    #[test]
    fn checked_line_does_not_hide_a_later_open_one() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let d18 = date(2025, 11, 18);
        write_flat(&resolver, d18, "- [x] Water plants\n[10:00]\n- [ ] Water plants\n");
        let got = harvest_unfinished(&FsStorage, &resolver, d18).unwrap();
        assert_eq!(
            got,
            vec![Bucket {
                date: d18,
                tasks: vec!["Water plants".into()],
            }]
        );
    }

    #[test]
    fn carried_copy_and_original_both_stay_open() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let d17 = date(2025, 11, 17);
        let d18 = date(2025, 11, 18);
        write_organized(&resolver, d17, "- [ ] Renew passport\n- [ ] Water plants\n");
        write_flat(
            &resolver,
            d18,
            "[2025-11-17](2025-11-17.md)\n\n- [x] Renew passport\n- [ ] Water plants\n",
        );
        let got = harvest_unfinished(&FsStorage, &resolver, d18).unwrap();
        assert_eq!(
            got,
            vec![
                Bucket {
                    date: d17,
                    tasks: vec!["Renew passport".into(), "Water plants".into()],
                },
                Bucket {
                    date: d17,
                    tasks: vec!["Water plants".into()],
                },
            ]
        );
    }

    #[test]
    fn missing_linked_note_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let d18 = date(2025, 11, 18);
        write_flat(
            &resolver,
            d18,
            "[2025-10-01](2025-10-01.md)\n\n- [ ] Old thing\n",
        );
        let got = harvest_unfinished(&FsStorage, &resolver, d18).unwrap();
        assert_eq!(got[0].date, date(2025, 10, 1));
        assert_eq!(got[0].tasks, vec!["Old thing".to_string()]);
    }

    #[test]
    fn relocate_moves_flat_note() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let d = date(2025, 11, 18);
        write_flat(&resolver, d, "yesterday");
        assert!(relocate_note(&FsStorage, &resolver, d).unwrap());
        assert!(!resolver.flat_path(d).exists());
        assert_eq!(
            fs::read_to_string(resolver.organized_path(d)).unwrap(),
            "yesterday"
        );
        // Second run is a no-op
        assert!(!relocate_note(&FsStorage, &resolver, d).unwrap());
    }

    #[test]
    fn relocate_never_clobbers_organized_note() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let d = date(2025, 11, 18);
        write_flat(&resolver, d, "flat");
        write_organized(&resolver, d, "organized");
        assert!(!relocate_note(&FsStorage, &resolver, d).unwrap());
        assert_eq!(fs::read_to_string(resolver.flat_path(d)).unwrap(), "flat");
        assert_eq!(
            fs::read_to_string(resolver.organized_path(d)).unwrap(),
            "organized"
        );
    }

    #[test]
    fn create_day_note_archives_and_seeds() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let yesterday = date(2025, 11, 18);
        let today = date(2025, 11, 19);
        write_flat(&resolver, yesterday, "## Tasks\n- [ ] A\n- [x] B\n");

        let path = create_day_note(&FsStorage, &resolver, today).unwrap();
        assert_eq!(path, resolver.flat_path(today));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[2025-11-18](2025-11-18.md)"));
        assert!(content.contains("- [ ] A"));
        assert!(content.trim_end().ends_with("---"));
        assert!(!content.contains('B'));
        assert!(resolver.organized_path(yesterday).exists());
        assert!(!resolver.flat_path(yesterday).exists());
    }

    #[test]
    fn create_day_note_without_history() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let today = date(2025, 11, 19);
        let path = create_day_note(&FsStorage, &resolver, today).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "# 2025-11-19\n\n");
        assert!(!tmp.path().join("2025").exists());
    }
}
