//! Entity types shared by the tasktag catalog, store and presentation layers.

/// Display colors.
pub mod color;
/// Identifier types.
pub mod id;
/// Tags and tag groups.
pub mod tag;
/// Tasks.
pub mod task;

pub use color::{Color, ParseColorError};
pub use id::{TagId, TaskId};
pub use tag::{Tag, TagGroup};
pub use task::Task;
