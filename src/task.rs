//! Task data structures.
//!
//! This module defines the two record shapes of the task tree: a top-level
//! `Task`, which may own an ordered list of `Subtask`s, and the `Subtask`
//! itself, which cannot own anything. Keeping them separate makes the
//! one-level nesting limit a property of the types.

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::ids::TaskId;

/// A top-level work item.
///
/// When `subtasks` is non-empty, `done` is derived from the subtasks by
/// [`crate::store::TaskStore::update_subtask`]. A task without subtasks is a
/// leaf and its `done` flag is set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Subtask>,
}

/// A child of a top-level task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
}

impl Task {
    /// Create an open leaf task.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            done: false,
            subtasks: Vec::new(),
        }
    }

    /// True when the task has no subtasks and its completion is set directly.
    pub fn is_leaf(&self) -> bool {
        self.subtasks.is_empty()
    }

    /// Logical AND over the subtasks' completion flags.
    ///
    /// Vacuously true for a leaf.
    pub fn all_subtasks_done(&self) -> bool {
        self.subtasks.iter().all(|st| st.done)
    }

    /// Look up a subtask by id.
    pub fn subtask(&self, id: TaskId) -> Option<&Subtask> {
        self.subtasks.iter().find(|st| st.id == id)
    }

    /// Copy of this task with `done` replaced.
    pub fn with_done(&self, done: bool) -> Self {
        Task {
            done,
            ..self.clone()
        }
    }

    /// Largest id held by this task or any of its subtasks.
    pub(crate) fn max_id(&self) -> TaskId {
        self.subtasks
            .iter()
            .map(|st| st.id)
            .fold(self.id, TaskId::max)
    }
}

impl Subtask {
    /// Create an open subtask.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Subtask {
            id,
            text: text.into(),
            done: false,
        }
    }

    /// Copy of this subtask with `done` replaced.
    pub fn with_done(&self, done: bool) -> Self {
        Subtask {
            done,
            ..self.clone()
        }
    }
}

/// Reject text that is empty once surrounding whitespace is removed.
///
/// On success the input is returned untouched; stored text keeps whatever
/// whitespace the user typed.
pub fn validate_text(text: &str) -> Result<&str, InputError> {
    if text.trim().is_empty() {
        Err(InputError::Empty)
    } else {
        Ok(text)
    }
}
