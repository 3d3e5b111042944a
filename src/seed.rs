//! Example task set loaded at startup.

use crate::ids::TaskId;
use crate::task::{Subtask, Task};

/// Largest id used by [`initial_tasks`].
pub const SEED_MAX_ID: u64 = 19;

fn task(id: u64, text: &str, done: bool, subtasks: &[(u64, &str)]) -> Task {
    Task {
        id: TaskId::new(id),
        text: text.to_string(),
        done,
        subtasks: subtasks
            .iter()
            .map(|&(sid, stext)| Subtask::new(TaskId::new(sid), stext))
            .collect(),
    }
}

/// The four study goals every session starts with.
///
/// Completion flags are kept as shipped: "React study" and "IT fundamentals
/// study" start done although none of their subtasks are.
pub fn initial_tasks() -> Vec<Task> {
    vec![
        task(
            1,
            "Java Silver study",
            false,
            &[(11, "Review basic syntax"), (12, "Take a mock exam")],
        ),
        task(
            2,
            "React study",
            true,
            &[(13, "progate"), (14, "udemy"), (15, "Build a personal app")],
        ),
        task(
            3,
            "IT fundamentals study",
            true,
            &[(16, "Software"), (17, "Hardware")],
        ),
        task(
            4,
            "AWS study",
            false,
            &[(18, "Networking services"), (19, "Compute services")],
        ),
    ]
}
