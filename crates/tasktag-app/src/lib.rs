//! Application layer for tasktag.
//!
//! Owns the tag catalog, the task store, the edit workflow and the list diff
//! that presentation layers use to redraw only what changed.

pub mod config;
pub mod list_diff;
pub mod tag_catalog;
pub mod task_draft;
pub mod task_store;

// Re-exports for convenience
pub use config::{AppConfig, CatalogConfig, SeedTag, default_config_path};
pub use list_diff::{ChangeKind, DiffEntry, ListDiff, ListItem, diff_lists};
pub use tag_catalog::TagCatalog;
pub use task_draft::{DraftError, TaskDraft};
pub use task_store::{StoreOutcome, TaskStore};
