use crate::model::task::TaskItem;
use crate::parse::markers::{parse_checkbox, parse_heading, parse_time_line};

/// Tracks which heading a line falls under while walking a note.
///
/// A standalone `[HH:MM]` line ends the current heading's scope; the time
/// is remembered so the next heading can show which check-in opened it.
#[derive(Debug, Default, Clone)]
pub struct HeaderScope {
    header: String,
    session: Option<String>,
    pending_time: Option<String>,
}

/// What a line meant to the scope tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeLine {
    Time,
    Heading,
    Other,
}

impl HeaderScope {
    /// Feed one line; time and heading lines update the scope.
    pub fn observe(&mut self, line: &str) -> ScopeLine {
        if let Some(time) = parse_time_line(line) {
            self.header.clear();
            self.session = None;
            self.pending_time = Some(time.to_string());
            return ScopeLine::Time;
        }
        if let Some(heading) = parse_heading(line) {
            self.header = heading.to_string();
            self.session = self.pending_time.take();
            return ScopeLine::Heading;
        }
        ScopeLine::Other
    }

    /// Active heading text, empty when none
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// A task line consumes any time marker not yet claimed by a heading.
    fn claim_task(&mut self) {
        self.pending_time = None;
    }
}

/// Extract a flat, header-grouped task list from a note's raw text.
///
/// Ids are assigned in file order starting at 0 and are only valid for
/// this parse.
pub fn parse_tasks(content: &str) -> Vec<TaskItem> {
    let mut scope = HeaderScope::default();
    let mut tasks = Vec::new();

    for line in content.split('\n') {
        if scope.observe(line) != ScopeLine::Other {
            continue;
        }
        if let Some(cb) = parse_checkbox(line) {
            tasks.push(TaskItem {
                id: tasks.len(),
                text: cb.text.to_string(),
                completed: cb.completed,
                header: scope.header().to_string(),
                session: scope.session().map(str::to_string),
            });
            scope.claim_task();
        }
    }

    tasks
}
