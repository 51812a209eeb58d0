//! Classification of two list snapshots for incremental redraws.

use std::collections::HashMap;
use std::hash::Hash;

use tasktag_core::{Task, TaskId};

/// Identity and content contract for items compared by [`diff_lists`].
pub trait ListItem {
    /// Key that identifies the same item across snapshots.
    type Id: Copy + Eq + Hash;

    /// Identity key of this item.
    fn item_id(&self) -> Self::Id;

    /// Whether two items with the same id render identically.
    fn same_content(&self, other: &Self) -> bool;
}

impl ListItem for Task {
    type Id = TaskId;

    fn item_id(&self) -> TaskId {
        self.id
    }

    fn same_content(&self, other: &Self) -> bool {
        Self::same_content(self, other)
    }
}

/// How an item changed between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Present in both with identical content; no redraw needed.
    Unchanged,
    /// Present in both with different content.
    Changed,
    /// Only present in the new snapshot.
    Inserted,
    /// Only present in the old snapshot.
    Removed,
}

/// Classification of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffEntry<I> {
    /// Item identity.
    pub id: I,
    /// Classification.
    pub kind: ChangeKind,
    /// Position in the old snapshot, if present there.
    pub old_index: Option<usize>,
    /// Position in the new snapshot, if present there.
    pub new_index: Option<usize>,
}

/// Result of [`diff_lists`].
///
/// Entries follow the new snapshot's order, then removed items in old order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDiff<I> {
    /// One entry per matched, inserted or removed item.
    pub entries: Vec<DiffEntry<I>>,
}

impl<I: Copy> ListDiff<I> {
    /// Number of entries of the given kind.
    #[must_use]
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    /// Ids of entries of the given kind, in entry order.
    #[must_use]
    pub fn ids(&self, kind: ChangeKind) -> Vec<I> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.id)
            .collect()
    }

    /// Whether nothing needs to be redrawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|entry| entry.kind == ChangeKind::Unchanged)
    }
}

/// Compare two ordered snapshots by id and content.
///
/// Items present in both are never reported as moved; their old and new
/// positions are carried on the entry instead. When an id occurs more than
/// once in a snapshot only its first occurrence is matched, later ones count
/// as inserted (new) or removed (old).
#[must_use]
pub fn diff_lists<T: ListItem>(old: &[T], new: &[T]) -> ListDiff<T::Id> {
    let mut old_positions: HashMap<T::Id, usize> = HashMap::with_capacity(old.len());
    for (idx, item) in old.iter().enumerate() {
        old_positions.entry(item.item_id()).or_insert(idx);
    }

    let mut matched = vec![false; old.len()];
    let mut entries = Vec::with_capacity(old.len().max(new.len()));

    for (new_idx, item) in new.iter().enumerate() {
        let id = item.item_id();
        let old_idx = old_positions
            .get(&id)
            .copied()
            .filter(|&idx| !matched[idx]);

        let entry = old_idx.map_or(
            DiffEntry {
                id,
                kind: ChangeKind::Inserted,
                old_index: None,
                new_index: Some(new_idx),
            },
            |old_idx| {
                matched[old_idx] = true;
                let kind = if old[old_idx].same_content(item) {
                    ChangeKind::Unchanged
                } else {
                    ChangeKind::Changed
                };
                DiffEntry {
                    id,
                    kind,
                    old_index: Some(old_idx),
                    new_index: Some(new_idx),
                }
            },
        );
        entries.push(entry);
    }

    entries.extend(
        old.iter()
            .enumerate()
            .filter(|(idx, _)| !matched[*idx])
            .map(|(idx, item)| DiffEntry {
                id: item.item_id(),
                kind: ChangeKind::Removed,
                old_index: Some(idx),
                new_index: None,
            }),
    );

    ListDiff { entries }
}
