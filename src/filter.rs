//! Visible-list filtering.
//!
//! Filtering only looks at top-level tasks. A visible task is always shown
//! with its full subtask list.

use crate::task::Task;

/// Keep top-level tasks whose text contains `keyword` (case-sensitive) and
/// that are either open or `show_done` is set. An empty keyword matches all.
pub fn visible_tasks<'a>(tasks: &'a [Task], keyword: &str, show_done: bool) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| is_visible(t, keyword, show_done))
        .collect()
}

/// The filter rule for a single top-level task.
pub fn is_visible(task: &Task, keyword: &str, show_done: bool) -> bool {
    (show_done || !task.done) && task.text.contains(keyword)
}

/// Filter settings held by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub keyword: String,
    pub show_done: bool,
}

impl Default for TaskFilter {
    fn default() -> Self {
        TaskFilter {
            keyword: String::new(),
            show_done: true,
        }
    }
}

impl TaskFilter {
    pub fn new(keyword: impl Into<String>, show_done: bool) -> Self {
        TaskFilter {
            keyword: keyword.into(),
            show_done,
        }
    }

    /// Whether a single top-level task passes the filter.
    pub fn matches(&self, task: &Task) -> bool {
        is_visible(task, &self.keyword, self.show_done)
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        visible_tasks(tasks, &self.keyword, self.show_done)
    }

    /// True when nothing is being filtered out.
    pub fn is_passthrough(&self) -> bool {
        self.show_done && self.keyword.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TaskId;
    use crate::seed::initial_tasks;
    use crate::task::Subtask;

    use proptest::prelude::*;

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id.get()).collect()
    }

    #[test]
    fn empty_keyword_with_done_shows_everything() {
        let tasks = initial_tasks();
        let visible = visible_tasks(&tasks, "", true);
        assert_eq!(ids(&visible), vec![1, 2, 3, 4]);
        assert!(visible.iter().zip(&tasks).all(|(v, t)| *v == t));
    }

    #[test]
    fn hide_done_drops_completed_tasks() {
        let tasks = initial_tasks();
        assert_eq!(ids(&visible_tasks(&tasks, "", false)), vec![1, 4]);
        // Keyword matches a done task, but it stays hidden.
        assert!(visible_tasks(&tasks, "React", false).is_empty());
        assert_eq!(ids(&visible_tasks(&tasks, "React", true)), vec![2]);
    }

    #[test]
    fn keyword_is_case_sensitive_substring() {
        let tasks = initial_tasks();
        assert_eq!(ids(&visible_tasks(&tasks, "study", true)), vec![1, 2, 3, 4]);
        assert_eq!(ids(&visible_tasks(&tasks, "AWS", true)), vec![4]);
        assert!(visible_tasks(&tasks, "aws", true).is_empty());
    }

    #[test]
    fn keyword_ignores_subtask_text() {
        let tasks = initial_tasks();
        // "udemy" only appears as a subtask of task 2.
        assert!(visible_tasks(&tasks, "udemy", true).is_empty());
    }

    #[test]
    fn visible_parent_keeps_all_subtasks() {
        let tasks = vec![Task {
            id: TaskId::new(1),
            text: "Parent".into(),
            done: false,
            subtasks: vec![
                Subtask::new(TaskId::new(2), "open"),
                Subtask::new(TaskId::new(3), "closed").with_done(true),
            ],
        }];
        let visible = visible_tasks(&tasks, "Par", false);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].subtasks.len(), 2);
    }

    #[test]
    fn single_task_rule() {
        let open = Task::new(TaskId::new(1), "AWS study");
        let done = open.with_done(true);
        assert!(is_visible(&open, "", false));
        assert!(is_visible(&open, "AWS", false));
        assert!(!is_visible(&open, "aws", true));
        assert!(!is_visible(&done, "AWS", false));
        assert!(is_visible(&done, "AWS", true));
        assert_eq!(TaskFilter::new("AWS", false).matches(&done), is_visible(&done, "AWS", false));
    }

    #[test]
    fn task_filter_defaults_to_showing_all() {
        let filter = TaskFilter::default();
        assert!(filter.is_passthrough());
        let tasks = initial_tasks();
        assert_eq!(filter.apply(&tasks).len(), 4);
        assert!(!TaskFilter::new("x", true).is_passthrough());
        assert!(!TaskFilter::new("", false).is_passthrough());
    }

    fn task_strategy() -> impl Strategy<Value = Task> {
        (1u64..1000, "[a-cA-C]{0,6}", any::<bool>()).prop_map(|(raw, text, done)| Task {
            id: TaskId::new(raw),
            text,
            done,
            subtasks: Vec::new(),
        })
    }

    proptest! {
        #[test]
        fn filter_agrees_with_matches(
            tasks in prop::collection::vec(task_strategy(), 0..24),
            keyword in "[a-cA-C]{0,2}",
            show_done in any::<bool>(),
        ) {
            let filter = TaskFilter::new(keyword, show_done);
            let visible = filter.apply(&tasks);
            let expected: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t)).collect();
            prop_assert_eq!(&visible, &expected);
            if !show_done {
                prop_assert!(visible.iter().all(|t| !t.done));
            }
        }
    }
}
