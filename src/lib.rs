//! # Taskpad Core
//!
//! Core state and persistence for the Taskpad offline to-do manager.
//!
//! This crate owns the task list, its sort policy and change notifications,
//! computes minimal row edits for the display, and stores tasks and the local
//! account in key-value storage. It has no dependency on any particular UI.

pub mod config;
pub mod domain;
pub mod error;
pub mod session;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::TaskpadConfig;
pub use domain::{
    action::{dispatch, ActionOutcome, ContextMenu, LayoutMode, MenuItem, TaskAction},
    diff::{diff, Edit, EditScript},
    sorting::SortOrder,
    task::{Priority, Task, TaskId},
};
pub use error::{Result, TaskpadError};
pub use session::{Refresh, TaskSession};
pub use storage::{CredentialStore, FileStorage, KeyValueStore, MemoryStorage, TaskStorage};
pub use store::{SubscriptionId, TaskSequence, TaskStore};
