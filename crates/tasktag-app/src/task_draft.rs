//! Edit workflow that validates a task before it reaches the store.

use tasktag_core::{Tag, TagId, Task, TaskId};
use thiserror::Error;
use tracing::debug;

use crate::task_store::TaskStore;

/// Reasons a draft cannot be saved.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DraftError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,
    /// No tag is selected.
    #[error("select at least one tag")]
    NoTags,
}

/// In-progress edit of a new or existing task.
///
/// A failed [`save`](Self::save) leaves both the draft and the store intact,
/// so the caller can fix the input and try again.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    original: Option<Task>,
    title: String,
    tags: Vec<Tag>,
}

impl TaskDraft {
    /// Start a draft for a brand new task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a draft preloaded from an existing task.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self {
            original: Some(task.clone()),
            title: task.title.clone(),
            tags: task.tags.clone(),
        }
    }

    /// Id of the task being edited, if any.
    #[must_use]
    pub fn editing(&self) -> Option<TaskId> {
        self.original.as_ref().map(|task| task.id)
    }

    /// Current title text, untrimmed.
    #[must_use]
    pub const fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Replace the title text.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Selected tags in selection order.
    #[must_use]
    pub const fn selected_tags(&self) -> &[Tag] {
        self.tags.as_slice()
    }

    /// Whether a tag with this id is selected.
    #[must_use]
    pub fn is_selected(&self, id: TagId) -> bool {
        self.tags.iter().any(|tag| tag.id == id)
    }

    /// Select a tag; selecting it twice keeps one copy.
    pub fn select_tag(&mut self, tag: Tag) {
        if !self.is_selected(tag.id) {
            self.tags.push(tag);
        }
    }

    /// Drop a tag from the selection.
    pub fn deselect_tag(&mut self, id: TagId) {
        self.tags.retain(|tag| tag.id != id);
    }

    /// Select the tag if unselected, otherwise deselect it. Returns the new state.
    pub fn toggle_tag(&mut self, tag: Tag) -> bool {
        if self.is_selected(tag.id) {
            self.deselect_tag(tag.id);
            false
        } else {
            self.select_tag(tag);
            true
        }
    }

    /// Validate and write the draft, adding a new task or replacing the edited one.
    ///
    /// Edits keep the original id, creation time and completion flag.
    ///
    /// # Errors
    /// Returns [`DraftError::EmptyTitle`] for blank titles and
    /// [`DraftError::NoTags`] when nothing is selected.
    pub fn save(&self, store: &mut TaskStore) -> Result<TaskId, DraftError> {
        let task = self.build()?;
        let id = task.id;
        if self.original.is_some() {
            if !store.update(task).is_applied() {
                debug!(%id, "edited task no longer exists");
            }
        } else {
            store.add(task);
        }
        Ok(id)
    }

    fn build(&self) -> Result<Task, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if self.tags.is_empty() {
            return Err(DraftError::NoTags);
        }

        Ok(self.original.as_ref().map_or_else(
            || Task::new(title, self.tags.clone()),
            |original| Task {
                title: title.to_owned(),
                tags: self.tags.clone(),
                ..original.clone()
            },
        ))
    }
}
