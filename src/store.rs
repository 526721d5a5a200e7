use crate::{
    domain::{sort_tasks, SortOrder, Task, TaskId},
    error::{Result, TaskpadError},
};
use std::{collections::HashSet, fmt, sync::Arc};
use tracing::{debug, warn};

/// Immutable snapshot of the task list
///
/// Every publish creates a new allocation, so `Arc::ptr_eq` tells whether two
/// snapshots come from the same publish.
pub type TaskSequence = Arc<[Task]>;

/// Handle returned by [`TaskStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&TaskSequence) + Send>;

/// Owner of the current task sequence
///
/// All mutations copy the current sequence, apply the change and the active
/// sort order, then publish the copy to every observer.
pub struct TaskStore {
    current: TaskSequence,
    sort_order: SortOrder,
    version: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::with_sort_order(SortOrder::None)
    }

    /// Creates an empty store whose first load is already sorted by `order`
    pub fn with_sort_order(sort_order: SortOrder) -> Self {
        Self {
            current: Arc::from(Vec::new()),
            sort_order,
            version: 0,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current snapshot
    pub fn tasks(&self) -> TaskSequence {
        Arc::clone(&self.current)
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Number of publishes so far
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn find_by_id(&self, id: &TaskId) -> Option<&Task> {
        self.current.iter().find(|task| task.id() == id)
    }

    pub fn position_of(&self, id: &TaskId) -> Option<usize> {
        self.current.iter().position(|task| task.id() == id)
    }

    /// Registers an observer called with the full sequence on every publish
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&TaskSequence) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Replaces the whole sequence, typically with tasks loaded from storage
    ///
    /// Later duplicates of an id are dropped so the sequence stays unique.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        let mut seen = HashSet::with_capacity(tasks.len());
        let mut unique = Vec::with_capacity(tasks.len());
        for task in tasks {
            if seen.insert(task.id().clone()) {
                unique.push(task);
            } else {
                warn!(task_id = %task.id(), "Dropping task with duplicate id");
            }
        }
        self.publish_sorted(unique);
    }

    /// Appends a task, re-sorting if a sort order is active
    ///
    /// Returns [`TaskpadError::DuplicateTaskId`] and leaves the sequence
    /// untouched if a task with the same id is already stored.
    pub fn add(&mut self, task: Task) -> Result<()> {
        if self.position_of(task.id()).is_some() {
            warn!(task_id = %task.id(), "Rejecting task with duplicate id");
            return Err(TaskpadError::DuplicateTaskId(task.id().to_string()));
        }
        let mut next = self.current.to_vec();
        next.push(task);
        self.publish_sorted(next);
        Ok(())
    }

    /// Removes the task at `position`; out-of-range positions are ignored
    pub fn remove_at(&mut self, position: usize) {
        if position >= self.current.len() {
            debug!(position, len = self.current.len(), "Ignoring out-of-range removal");
            return;
        }
        let mut next = self.current.to_vec();
        next.remove(position);
        self.publish(next);
    }

    /// Replaces the stored task with the same id, re-sorting if a sort order is active
    ///
    /// The sequence is republished even when no task matches.
    pub fn update_by_id(&mut self, task: Task) {
        let mut next = self.current.to_vec();
        match next.iter_mut().find(|t| t.is_same_item(&task)) {
            Some(slot) => *slot = task,
            None => debug!(task_id = %task.id(), "Update for unknown task id"),
        }
        self.publish_sorted(next);
    }

    /// Sorts by `order` and keeps it active for later mutations
    ///
    /// Does nothing while the sequence is empty.
    pub fn sort_by(&mut self, order: SortOrder) {
        if self.current.is_empty() {
            return;
        }
        let mut next = self.current.to_vec();
        sort_tasks(&mut next, order);
        self.sort_order = order;
        self.publish(next);
    }

    fn publish_sorted(&mut self, mut next: Vec<Task>) {
        sort_tasks(&mut next, self.sort_order);
        self.publish(next);
    }

    fn publish(&mut self, next: Vec<Task>) {
        self.current = Arc::from(next);
        self.version += 1;
        debug!(
            version = self.version,
            len = self.current.len(),
            sort_order = %self.sort_order,
            "Published task list"
        );
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.current);
        }
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.current)
            .field("sort_order", &self.sort_order)
            .field("version", &self.version)
            .field("observers", &self.observers.len())
            .finish()
    }
}
