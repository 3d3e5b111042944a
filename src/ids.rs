//! Task identifiers and the generator that hands them out.
//!
//! Ids are drawn from a single counter owned by the store, so top-level tasks
//! and subtasks share one id space and never collide.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a task or subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wrap a raw id value.
    pub const fn new(raw: u64) -> Self {
        TaskId(raw)
    }

    /// The raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id source.
///
/// Every id returned by [`IdGenerator::next`] is strictly greater than any id
/// previously returned or passed to [`IdGenerator::observe`]. Once `u64::MAX`
/// has been used the generator is exhausted and hands out nothing.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: Option<u64>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        IdGenerator { next: Some(1) }
    }
}

impl IdGenerator {
    /// Create a generator whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        IdGenerator {
            next: Some(first.max(1)),
        }
    }

    /// Hand out a fresh id, or `None` if the id space is used up.
    pub fn next(&mut self) -> Option<TaskId> {
        let raw = self.next?;
        self.next = raw.checked_add(1);
        Some(TaskId(raw))
    }

    /// Record an id that entered the store from outside so it is never reissued.
    pub fn observe(&mut self, id: TaskId) {
        if let Some(next) = self.next {
            if id.0 >= next {
                self.next = id.0.checked_add(1);
            }
        }
    }
}
