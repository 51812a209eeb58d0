//! Catalog of tags available for assignment.

use tasktag_core::{Color, Tag, TagGroup, TagId};
use tracing::debug;

const PREDEFINED: &[(&str, TagGroup, Color)] = &[
    ("Not started", TagGroup::Readiness, Color::GRAY),
    ("In progress", TagGroup::Readiness, Color::BLUE),
    ("Done", TagGroup::Readiness, Color::GREEN),
    ("Low", TagGroup::Importance, Color::rgb(0x004C_AF50)),
    ("Medium", TagGroup::Importance, Color::rgb(0x00FF_C107)),
    ("High", TagGroup::Importance, Color::rgb(0x00FF_9800)),
    ("Critical", TagGroup::Importance, Color::RED),
    ("Not urgent", TagGroup::Urgency, Color::rgb(0x009E_9E9E)),
    ("Urgent", TagGroup::Urgency, Color::rgb(0x00FF_5722)),
    ("On fire", TagGroup::Urgency, Color::RED),
    ("Work", TagGroup::Sphere, Color::rgb(0x003F_51B5)),
    ("Personal", TagGroup::Sphere, Color::rgb(0x00E9_1E63)),
    ("Home", TagGroup::Sphere, Color::rgb(0x008B_C34A)),
    ("Shopping", TagGroup::Sphere, Color::rgb(0x00FF_EB3B)),
    ("Health", TagGroup::Sphere, Color::rgb(0x0000_BCD4)),
    ("Finance", TagGroup::Sphere, Color::rgb(0x004C_AF50)),
    ("Learning", TagGroup::Sphere, Color::rgb(0x009C_27B0)),
];

/// Append-only collection of predefined and custom tags, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    tags: Vec<Tag>,
}

impl TagCatalog {
    /// Catalog holding no tags at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog populated with the predefined readiness, importance, urgency and sphere tags.
    #[must_use]
    pub fn initialize() -> Self {
        let tags = PREDEFINED
            .iter()
            .map(|&(name, group, color)| Tag::new(name, group, color))
            .collect::<Vec<_>>();
        debug!(count = tags.len(), "initialized predefined tags");
        Self { tags }
    }

    /// Every tag, predefined first, then custom tags in the order they were added.
    #[must_use]
    pub const fn list(&self) -> &[Tag] {
        self.tags.as_slice()
    }

    /// Create a custom tag and append it. Names need not be unique.
    pub fn add_custom(&mut self, name: impl Into<String>, color: Color) -> Tag {
        let tag = Tag::new(name, TagGroup::Custom, color);
        debug!(id = %tag.id, name = %tag.name, "added custom tag");
        self.tags.push(tag.clone());
        tag
    }

    /// Tags partitioned by group in display order, skipping empty groups.
    #[must_use]
    pub fn grouped(&self) -> Vec<(TagGroup, Vec<&Tag>)> {
        TagGroup::ALL
            .iter()
            .map(|&group| {
                let members = self.tags.iter().filter(|tag| tag.group == group).collect::<Vec<_>>();
                (group, members)
            })
            .filter(|(_, members)| !members.is_empty())
            .collect()
    }

    /// Look up a tag by identifier.
    #[must_use]
    pub fn get(&self, id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    /// Every tag whose name matches case-insensitively, in insertion order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Vec<&Tag> {
        let wanted = name.trim().to_lowercase();
        self.tags
            .iter()
            .filter(|tag| tag.name.to_lowercase() == wanted)
            .collect()
    }

    /// Number of tags.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the catalog holds no tags.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
