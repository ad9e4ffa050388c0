use serde::Serialize;

use crate::model::note::{LocationKind, NoteLocation};
use crate::model::task::{TaskItem, group_by_header};
use crate::ops::timestamp::CheckIn;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub tasks: &'a [TaskItem],
}

#[derive(Serialize)]
pub struct NotePathJson {
    pub date: String,
    pub path: String,
    pub location: LocationKind,
}

#[derive(Serialize)]
pub struct NavJson {
    pub from: String,
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct CheckInJson {
    pub path: String,
    pub check_in: &'static str,
    pub separator_added: bool,
}

#[derive(Serialize)]
pub struct ToggleJson {
    pub id: usize,
    pub toggled: bool,
}

pub fn check_in_label(action: CheckIn) -> &'static str {
    match action {
        CheckIn::Started => "started",
        CheckIn::Appended => "appended",
        CheckIn::Replaced => "replaced",
    }
}

pub fn location_path(location: &NoteLocation) -> Option<String> {
    location.path().map(|p| p.display().to_string())
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `3. [x] Call the bank`
pub fn format_task_line(task: &TaskItem) -> String {
    format!("{}. {} {}", task.id, task.checkbox(), task.text)
}

/// Tasks grouped under their headers, blank line between groups.
pub fn format_task_listing(tasks: &[TaskItem]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (header, items)) in group_by_header(tasks).iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(header.clone());
        for task in items {
            lines.push(format!("  {}", format_task_line(task)));
        }
    }
    lines
}

/// `done/total` summary
pub fn format_task_summary(tasks: &[TaskItem]) -> String {
    let done = tasks.iter().filter(|t| t.completed).count();
    format!("{}/{} done", done, tasks.len())
}
