use serde::Serialize;

/// Label shown for tasks that sit under no heading. Display only: never
/// written back to a note.
pub const GENERAL_HEADER: &str = "General";

/// A checkbox line parsed out of a daily note.
///
/// `id` is assigned per parse pass and means nothing across parses. A task's
/// durable identity is the pair (`text`, `header`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskItem {
    pub id: usize,
    /// Trimmed text after the checkbox
    pub text: String,
    pub completed: bool,
    /// Nearest heading above the task; empty when a time marker ended the
    /// previous heading's scope or there was none
    pub header: String,
    /// `HH:MM` of the check-in that opened the heading, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

impl TaskItem {
    /// Header as shown in task lists: `Heading [HH:MM]`, or `General`.
    pub fn display_header(&self) -> String {
        if self.header.is_empty() {
            return GENERAL_HEADER.to_string();
        }
        match &self.session {
            Some(time) => format!("{} [{}]", self.header, time),
            None => self.header.clone(),
        }
    }

    /// Checkbox glyph as it appears in the file
    pub fn checkbox(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }
}

/// Group tasks by display header, groups in order of first appearance.
pub fn group_by_header(tasks: &[TaskItem]) -> Vec<(String, Vec<&TaskItem>)> {
    let mut groups: Vec<(String, Vec<&TaskItem>)> = Vec::new();
    for task in tasks {
        let header = task.display_header();
        match groups.iter_mut().find(|(h, _)| *h == header) {
            Some((_, items)) => items.push(task),
            None => groups.push((header, vec![task])),
        }
    }
    groups
}
