//! The task store and plain-text rendering helpers.
//!
//! `TaskStore` owns the ordered list of top-level tasks and is the only place
//! the list is mutated. Each mutation produces a new snapshot and swaps it in
//! as a whole; snapshots already handed out through [`TaskStore::snapshot`]
//! never change underneath their holders.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::ids::{IdGenerator, TaskId};
use crate::seed::{initial_tasks, SEED_MAX_ID};
use crate::task::{Subtask, Task};

/// An immutable view of the task list at one point in time.
pub type Snapshot = Arc<Vec<Task>>;

/// In-memory store for the task tree.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Snapshot,
    ids: IdGenerator,
}

impl TaskStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the example task set, with fresh ids starting after it.
    pub fn seeded() -> Self {
        TaskStore {
            tasks: Arc::new(initial_tasks()),
            ids: IdGenerator::starting_at(SEED_MAX_ID + 1),
        }
    }

    /// A store holding `tasks` as-is. Fresh ids start past the largest id found.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut ids = IdGenerator::default();
        for t in &tasks {
            ids.observe(t.max_id());
        }
        TaskStore {
            tasks: Arc::new(tasks),
            ids,
        }
    }

    /// The current snapshot. Cheap to clone and unaffected by later mutations.
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.tasks)
    }

    /// Top-level tasks in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a top-level task by ID.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Number of top-level tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Total number of subtasks across all parents.
    pub fn subtask_count(&self) -> usize {
        self.tasks.iter().map(|t| t.subtasks.len()).sum()
    }

    /// Writable access to the list. Clones it first if a reader still holds
    /// the current snapshot, so only callers that are about to change
    /// something may use this.
    fn edit(&mut self) -> &mut Vec<Task> {
        Arc::make_mut(&mut self.tasks)
    }

    /// Append a new open top-level task.
    ///
    /// Returns `None` without touching the list when `text` is blank or no
    /// fresh id is left.
    pub fn create_task(&mut self, text: &str) -> Option<TaskId> {
        if text.trim().is_empty() {
            debug!("create_task ignored: blank text");
            return None;
        }
        let Some(id) = self.ids.next() else {
            warn!("create_task ignored: task ids exhausted");
            return None;
        };
        self.edit().push(Task::new(id, text));
        debug!(%id, "task created");
        Some(id)
    }

    /// Replace the top-level task with the same id as `updated`, verbatim.
    ///
    /// Returns false if no such task exists.
    pub fn update_task(&mut self, updated: Task) -> bool {
        let Some(idx) = self.position(updated.id) else {
            debug!(id = %updated.id, "update_task ignored: unknown task");
            return false;
        };
        self.ids.observe(updated.max_id());
        let id = updated.id;
        self.edit()[idx] = updated;
        debug!(%id, "task updated");
        true
    }

    /// Remove a top-level task together with its subtasks.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(idx) = self.position(id) else {
            debug!(%id, "delete_task ignored: unknown task");
            return false;
        };
        let removed = self.edit().remove(idx);
        debug!(%id, subtasks = removed.subtasks.len(), "task deleted");
        true
    }

    /// Append a new open subtask to `parent`.
    ///
    /// The parent's `done` flag is left as it was.
    pub fn add_subtask(&mut self, parent: TaskId, text: &str) -> Option<TaskId> {
        if text.trim().is_empty() {
            debug!(%parent, "add_subtask ignored: blank text");
            return None;
        }
        let Some(idx) = self.position(parent) else {
            debug!(%parent, "add_subtask ignored: unknown parent");
            return None;
        };
        let Some(id) = self.ids.next() else {
            warn!(%parent, "add_subtask ignored: task ids exhausted");
            return None;
        };
        self.edit()[idx].subtasks.push(Subtask::new(id, text));
        debug!(%parent, %id, "subtask added");
        Some(id)
    }

    /// Replace a subtask of `parent` and recompute the parent's `done` as the
    /// AND of all its subtasks.
    pub fn update_subtask(&mut self, parent: TaskId, updated: Subtask) -> bool {
        let found = self.position(parent).and_then(|idx| {
            self.tasks[idx]
                .subtasks
                .iter()
                .position(|st| st.id == updated.id)
                .map(|sidx| (idx, sidx))
        });
        let Some((idx, sidx)) = found else {
            debug!(%parent, id = %updated.id, "update_subtask ignored: unknown parent or subtask");
            return false;
        };
        let id = updated.id;
        let task = &mut self.edit()[idx];
        task.subtasks[sidx] = updated;
        task.done = task.all_subtasks_done();
        debug!(%parent, %id, parent_done = task.done, "subtask updated");
        true
    }

    /// Remove a subtask from `parent`.
    ///
    /// The parent's `done` flag is not recomputed, even when the last subtask
    /// goes away.
    pub fn delete_subtask(&mut self, parent: TaskId, subtask: TaskId) -> bool {
        let found = self.position(parent).and_then(|idx| {
            self.tasks[idx]
                .subtasks
                .iter()
                .position(|st| st.id == subtask)
                .map(|sidx| (idx, sidx))
        });
        let Some((idx, sidx)) = found else {
            debug!(%parent, id = %subtask, "delete_subtask ignored: unknown parent or subtask");
            return false;
        };
        self.edit()[idx].subtasks.remove(sidx);
        debug!(%parent, id = %subtask, "subtask deleted");
        true
    }
}

/// Render tasks as a plain-text table, each subtask indented under its parent.
pub fn format_table(tasks: &[&Task]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<5} {:<6} {}", "ID", "Done", "Text");
    for t in tasks {
        let _ = writeln!(out, "{:<5} {:<6} {}", t.id, check_mark(t.done), truncate(&t.text, 60));
        for st in &t.subtasks {
            let _ = writeln!(
                out,
                "{:<5} {:<6}   - {}",
                st.id,
                check_mark(st.done),
                truncate(&st.text, 56)
            );
        }
    }
    out
}

/// Checkbox rendering of a completion flag.
pub fn check_mark(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
