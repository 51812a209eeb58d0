use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::id::TagId;

/// Classification axis a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagGroup {
    /// How far along the work is.
    Readiness,
    /// How much the task matters.
    Importance,
    /// How soon the task is due.
    Urgency,
    /// Area of life the task belongs to.
    Sphere,
    /// User-defined tags.
    Custom,
}

impl TagGroup {
    /// Every group in display order.
    pub const ALL: [Self; 5] = [
        Self::Readiness,
        Self::Importance,
        Self::Urgency,
        Self::Sphere,
        Self::Custom,
    ];

    /// Heading shown above the group's tags.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Readiness => "Readiness",
            Self::Importance => "Importance",
            Self::Urgency => "Urgency",
            Self::Sphere => "Sphere",
            Self::Custom => "My tags",
        }
    }
}

/// Labeled, colored category attachable to a task.
///
/// Tags never change after creation. Tasks hold copies, so a tag value
/// inside a task is a snapshot taken when it was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Stable identifier.
    pub id: TagId,
    /// Display name.
    pub name: String,
    /// Owning group.
    pub group: TagGroup,
    /// Display color.
    pub color: Color,
}

impl Tag {
    /// Create a tag with a freshly generated identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, group: TagGroup, color: Color) -> Self {
        Self {
            id: TagId::new(),
            name: name.into(),
            group,
            color,
        }
    }
}
