use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::OffsetDateTime;

use crate::id::{TagId, TaskId};
use crate::tag::Tag;

/// To-do item with a title, completion flag, creation time and tag snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier of the task.
    pub id: TaskId,
    /// Human-readable title.
    pub title: String,
    /// Whether the task is done.
    #[serde(default)]
    pub is_completed: bool,
    /// Tags copied at assignment time.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Creation timestamp in UTC, used for ordering only.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Task {
    /// Create an open task stamped with the current time.
    #[must_use]
    pub fn new(title: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self::with_created_at(title, tags, OffsetDateTime::now_utc())
    }

    /// Create an open task with an explicit creation timestamp.
    #[must_use]
    pub fn with_created_at(title: impl Into<String>, tags: Vec<Tag>, created_at: OffsetDateTime) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            is_completed: false,
            tags,
            created_at,
        }
    }

    /// Copy of this task with the completion flag flipped.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            is_completed: !self.is_completed,
            ..self.clone()
        }
    }

    /// Identifiers of the attached tags.
    #[must_use]
    pub fn tag_ids(&self) -> BTreeSet<TagId> {
        self.tags.iter().map(|tag| tag.id).collect()
    }

    /// Whether `other` renders identically: same title, completion and tag ids.
    ///
    /// Tag order is ignored. Tag lists of different length never match, so
    /// duplicated entries are not collapsed.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.title == other.title
            && self.is_completed == other.is_completed
            && self.tags.len() == other.tags.len()
            && self.tag_ids() == other.tag_ids()
    }
}
