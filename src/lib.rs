//! # tasktree
//!
//! A task list with one level of subtasks. Top-level tasks can be created,
//! completed, and deleted; each may carry an ordered list of subtasks. When a
//! subtask changes, its parent's completion flag is recomputed as "every
//! subtask is done".
//!
//! The core is [`store::TaskStore`], which owns the list and exposes the
//! mutations, and [`filter::visible_tasks`], which derives the displayed
//! subset from a keyword and a "show completed" flag.
//!
//! ```
//! use tasktree::store::TaskStore;
//! use tasktree::filter::visible_tasks;
//!
//! let mut store = TaskStore::new();
//! let study = store.create_task("Study").unwrap();
//! let read = store.add_subtask(study, "Read").unwrap();
//!
//! let done = store.get(study).unwrap().subtask(read).unwrap().with_done(true);
//! store.update_subtask(study, done);
//! assert!(store.get(study).unwrap().done);
//!
//! assert!(visible_tasks(store.tasks(), "", false).is_empty());
//! ```
//!
//! Nothing is persisted: every session starts from [`seed::initial_tasks`]
//! or from an empty store.

pub mod error;
pub mod filter;
pub mod ids;
pub mod seed;
pub mod store;
pub mod task;
