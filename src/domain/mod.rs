pub mod action;
pub mod diff;
pub mod sorting;
pub mod task;

pub use action::{dispatch, ActionOutcome, ContextMenu, LayoutMode, MenuItem, TaskAction};
pub use diff::{diff, Edit, EditScript};
pub use sorting::{sort_tasks, SortOrder};
pub use task::{Priority, Task, TaskId};
