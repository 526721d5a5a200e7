use crate::{domain::task::Task, store::TaskStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How task details are presented when a task is opened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Details replace the list
    #[default]
    SinglePane,
    /// Details are shown next to the list
    TwoPane,
}

/// Something the user asked to do with a task row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    Edit(Task),
    Delete(Task),
    MarkDone(Task),
    Open(Task),
}

/// Result of dispatching a [`TaskAction`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The display should open the editor for this task
    ShowEditor(Task),
    /// The display should show this task's details
    ShowDetail { task: Task, layout: LayoutMode },
    /// The task was removed from the store
    Deleted(Task),
    /// The task's completion flag was toggled to `done`
    MarkedDone { task: Task, done: bool },
    /// The task is no longer in the store
    Ignored,
}

/// Applies an action to the store
///
/// Delete and mark-done locate the task by id, so a stale copy from the
/// display still targets the stored task.
pub fn dispatch(store: &mut TaskStore, action: TaskAction, layout: LayoutMode) -> ActionOutcome {
    match action {
        TaskAction::Edit(task) => ActionOutcome::ShowEditor(task),
        TaskAction::Open(task) => ActionOutcome::ShowDetail { task, layout },
        TaskAction::Delete(task) => match store.position_of(task.id()) {
            Some(position) => {
                let stored = store.tasks()[position].clone();
                store.remove_at(position);
                ActionOutcome::Deleted(stored)
            }
            None => {
                debug!(task_id = %task.id(), "Delete for unknown task id");
                ActionOutcome::Ignored
            }
        },
        TaskAction::MarkDone(task) => {
            let Some(mut stored) = store.find_by_id(task.id()).cloned() else {
                debug!(task_id = %task.id(), "Mark done for unknown task id");
                return ActionOutcome::Ignored;
            };
            let done = stored.toggle_done();
            store.update_by_id(stored.clone());
            ActionOutcome::MarkedDone { task: stored, done }
        }
    }
}

/// Entries of a task's options menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Edit,
    Delete,
    ToggleDone,
}

/// Options menu opened on a row, carrying the row it was opened for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub task: Task,
    pub position: usize,
}

impl ContextMenu {
    pub fn new(task: Task, position: usize) -> Self {
        Self { task, position }
    }

    /// Label for the completion entry
    pub fn done_label(&self) -> &'static str {
        if self.task.done {
            "Mark as Pending"
        } else {
            "Mark as Done"
        }
    }

    pub fn select(self, item: MenuItem) -> TaskAction {
        match item {
            MenuItem::Edit => TaskAction::Edit(self.task),
            MenuItem::Delete => TaskAction::Delete(self.task),
            MenuItem::ToggleDone => TaskAction::MarkDone(self.task),
        }
    }
}
