//! Property tests for the task store and list diff.

use std::collections::BTreeSet;

use proptest::prelude::*;
use tasktag_app::{ChangeKind, StoreOutcome, TaskStore, diff_lists};
use tasktag_core::{Color, Tag, TagGroup, Task, TaskId};
use time::OffsetDateTime;

#[derive(Clone, Debug)]
enum StoreOp {
    Add(i64),
    Toggle(usize),
    Delete(usize),
    Retitle(usize),
    DeleteUnknown,
}

fn op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (0i64..50).prop_map(StoreOp::Add),
        (0usize..16).prop_map(StoreOp::Toggle),
        (0usize..16).prop_map(StoreOp::Delete),
        (0usize..16).prop_map(StoreOp::Retitle),
        Just(StoreOp::DeleteUnknown),
    ]
}

fn task_at(secs: i64) -> Task {
    let created_at = OffsetDateTime::from_unix_timestamp(secs)
        .unwrap_or_else(|err| panic!("must convert unix timestamp: {err}"));
    Task::with_created_at(
        format!("task-{secs}"),
        vec![Tag::new("Home", TagGroup::Sphere, Color::GREEN)],
        created_at,
    )
}

fn pick(store: &TaskStore, idx: usize) -> Option<Task> {
    let listed = store.list();
    if listed.is_empty() {
        None
    } else {
        Some(listed[idx % listed.len()].clone())
    }
}

proptest! {
    #[test]
    fn store_stays_sorted_and_consistent(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut store = TaskStore::new();
        let mut live: BTreeSet<TaskId> = BTreeSet::new();

        for op in ops {
            match op {
                StoreOp::Add(secs) => {
                    let task = task_at(secs);
                    live.insert(task.id);
                    store.add(task.clone());
                    let matching = store.list().iter().filter(|t| t.id == task.id).count();
                    prop_assert_eq!(matching, 1);
                }
                StoreOp::Toggle(idx) => {
                    if let Some(task) = pick(&store, idx) {
                        store.toggle_completion(task.id);
                        let toggled = store.get(task.id).cloned();
                        prop_assert_eq!(toggled.map(|t| t.is_completed), Some(!task.is_completed));
                    }
                }
                StoreOp::Delete(idx) => {
                    if let Some(task) = pick(&store, idx) {
                        prop_assert_eq!(store.delete(task.id), StoreOutcome::Applied);
                        live.remove(&task.id);
                        prop_assert!(store.list().iter().all(|t| t.id != task.id));
                    }
                }
                StoreOp::Retitle(idx) => {
                    if let Some(mut task) = pick(&store, idx) {
                        task.title.push('!');
                        let before = store.list();
                        store.update(task.clone());
                        let diff = diff_lists(&before, &store.list());
                        prop_assert_eq!(diff.ids(ChangeKind::Changed), vec![task.id]);
                    }
                }
                StoreOp::DeleteUnknown => {
                    let before = store.len();
                    prop_assert_eq!(store.delete(TaskId::new()), StoreOutcome::NotFound);
                    prop_assert_eq!(store.len(), before);
                }
            }

            let listed = store.list();
            prop_assert!(listed.windows(2).all(|pair| pair[0].created_at >= pair[1].created_at));
            let ids: BTreeSet<TaskId> = listed.iter().map(|t| t.id).collect();
            prop_assert_eq!(&ids, &live);
        }
    }

    #[test]
    fn diff_covers_union_exactly_once(
        old_keep in prop::collection::vec(any::<bool>(), 0..20),
        fresh in 0usize..10,
    ) {
        let old: Vec<Task> = (0..old_keep.len()).map(|i| task_at(i64::try_from(i).unwrap_or(0))).collect();
        let mut new: Vec<Task> = old
            .iter()
            .zip(&old_keep)
            .filter(|(_, keep)| **keep)
            .map(|(task, _)| task.clone())
            .collect();
        new.extend((0..fresh).map(|i| task_at(100 + i64::try_from(i).unwrap_or(0))));

        let diff = diff_lists(&old, &new);
        let union: BTreeSet<TaskId> = old.iter().chain(&new).map(|t| t.id).collect();
        let total = diff.count(ChangeKind::Unchanged)
            + diff.count(ChangeKind::Changed)
            + diff.count(ChangeKind::Inserted)
            + diff.count(ChangeKind::Removed);
        prop_assert_eq!(total, union.len());
        prop_assert_eq!(diff.count(ChangeKind::Inserted), fresh);
        prop_assert_eq!(
            diff.count(ChangeKind::Removed),
            old_keep.iter().filter(|keep| !**keep).count()
        );
        prop_assert_eq!(diff.count(ChangeKind::Changed), 0);
    }
}
