//! Canonical in-memory task collection.

use std::cmp::Ordering;

use tasktag_core::{Task, TaskId};
use tracing::debug;

/// Result of a mutation addressed by task id.
///
/// A missing id is not an error: the call is a no-op and reports
/// [`StoreOutcome::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// At least one entry was changed.
    Applied,
    /// No entry carried the id; the store is unchanged.
    NotFound,
}

impl StoreOutcome {
    /// Whether the store was modified.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    task: Task,
}

/// Owned collection of tasks, listed newest first.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl TaskStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every task sorted by `created_at` descending.
    ///
    /// Equal timestamps fall back to insertion order, most recent insertion first.
    #[must_use]
    pub fn list(&self) -> Vec<Task> {
        let mut ordered: Vec<&Entry> = self.entries.iter().collect();
        ordered.sort_by(|a, b| compare_entries(a, b));
        ordered.into_iter().map(|entry| entry.task.clone()).collect()
    }

    /// Append a task as-is. Ids are not checked for uniqueness.
    pub fn add(&mut self, task: Task) {
        debug!(id = %task.id, title = %task.title, "adding task");
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { seq, task });
    }

    /// Replace the whole record whose id matches `task.id`.
    pub fn update(&mut self, task: Task) -> StoreOutcome {
        let id = task.id;
        match self.entries.iter_mut().find(|entry| entry.task.id == id) {
            Some(entry) => {
                debug!(%id, "replacing task");
                entry.task = task;
                StoreOutcome::Applied
            }
            None => not_found("update", id),
        }
    }

    /// Remove every entry carrying `id`.
    pub fn delete(&mut self, id: TaskId) -> StoreOutcome {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.task.id != id);
        let removed = before - self.entries.len();
        if removed == 0 {
            return not_found("delete", id);
        }
        debug!(%id, removed, "deleted task");
        StoreOutcome::Applied
    }

    /// Flip the completion flag of the entry carrying `id`.
    pub fn toggle_completion(&mut self, id: TaskId) -> StoreOutcome {
        match self.entries.iter_mut().find(|entry| entry.task.id == id) {
            Some(entry) => {
                entry.task = entry.task.toggled();
                debug!(%id, completed = entry.task.is_completed, "toggled task");
                StoreOutcome::Applied
            }
            None => not_found("toggle", id),
        }
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.entries
            .iter()
            .map(|entry| &entry.task)
            .find(|task| task.id == id)
    }

    /// Number of stored entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no tasks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.task
        .created_at
        .cmp(&a.task.created_at)
        .then_with(|| b.seq.cmp(&a.seq))
}

fn not_found(op: &'static str, id: TaskId) -> StoreOutcome {
    debug!(op, %id, "task not found, nothing changed");
    StoreOutcome::NotFound
}
