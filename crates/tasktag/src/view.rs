//! Plain-text rendering of tasks, tags and list diffs.

use std::fmt::Write as _;

use tasktag_app::{ChangeKind, ListDiff, TagCatalog};
use tasktag_core::{Tag, Task, TaskId};

const DONE_MARK: &str = "[x]";
const OPEN_MARK: &str = "[ ]";

/// One task row: `position. [x] title  [tag] [tag]  (short id)`.
pub fn task_line(position: usize, task: &Task) -> String {
    let mark = if task.is_completed { DONE_MARK } else { OPEN_MARK };
    let mut line = format!("{position:>3}. {mark} {}", task.title);
    if !task.tags.is_empty() {
        line.push(' ');
        for tag in &task.tags {
            let _ = write!(line, " [{}]", tag.name);
        }
    }
    let _ = write!(line, "  ({})", task.id.short());
    line
}

/// Full task list, numbered from 1.
pub fn task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks yet.\n".to_owned();
    }
    tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| task_line(idx + 1, task) + "\n")
        .collect()
}

fn tag_line(tag: &Tag) -> String {
    format!("  {:<12} {}  ({})", tag.name, tag.color, tag.id.short())
}

/// Catalog grouped by category under each group's heading.
pub fn tag_catalog(catalog: &TagCatalog) -> String {
    let mut out = String::new();
    for (group, tags) in catalog.grouped() {
        let _ = writeln!(out, "{}", group.display_name());
        for tag in tags {
            let _ = writeln!(out, "{}", tag_line(tag));
        }
    }
    if out.is_empty() {
        out.push_str("No tags.\n");
    }
    out
}

/// Summary line followed by one row per inserted, changed or removed task.
///
/// Unchanged rows are not repeated; `old` and `new` must be the snapshots the
/// diff was computed from.
pub fn diff_report(diff: &ListDiff<TaskId>, old: &[Task], new: &[Task]) -> String {
    if diff.is_empty() {
        return "No changes.\n".to_owned();
    }

    let mut parts = Vec::new();
    for (kind, label) in [
        (ChangeKind::Inserted, "added"),
        (ChangeKind::Changed, "updated"),
        (ChangeKind::Removed, "removed"),
    ] {
        let count = diff.count(kind);
        if count > 0 {
            parts.push(format!("{count} {label}"));
        }
    }

    let mut out = parts.join(", ");
    out.push('\n');
    for entry in &diff.entries {
        let row = match entry.kind {
            ChangeKind::Unchanged => continue,
            ChangeKind::Inserted => entry
                .new_index
                .and_then(|idx| new.get(idx).map(|task| format!("+{}", task_line(idx + 1, task)))),
            ChangeKind::Changed => entry
                .new_index
                .and_then(|idx| new.get(idx).map(|task| format!("~{}", task_line(idx + 1, task)))),
            ChangeKind::Removed => entry.old_index.and_then(|idx| {
                old.get(idx)
                    .map(|task| format!("-      {}  ({})", task.title, task.id.short()))
            }),
        };
        if let Some(row) = row {
            out.push_str(&row);
            out.push('\n');
        }
    }
    out
}
