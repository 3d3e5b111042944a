//! Enumerations for TUI state management.

use tasktree::ids::TaskId;

/// Which screen or prompt currently receives key presses.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    Keyword,
    AddTask,
    AddSubtask(TaskId),
    Help,
    Confirm,
}

/// One line of the visible list: either a top-level task or one of its subtasks.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ListRow {
    Task(TaskId),
    Subtask { parent: TaskId, id: TaskId },
}

impl ListRow {
    /// The top-level task this row belongs to.
    pub fn parent(self) -> TaskId {
        match self {
            ListRow::Task(id) => id,
            ListRow::Subtask { parent, .. } => parent,
        }
    }
}
