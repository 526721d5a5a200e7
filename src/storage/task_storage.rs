use crate::{domain::Task, error::Result, storage::KeyValueStore};
use std::sync::Arc;
use tracing::debug;

/// Persists the task list as a JSON array under a single key
#[derive(Clone)]
pub struct TaskStorage {
    store: Arc<dyn KeyValueStore>,
}

impl TaskStorage {
    pub const NAMESPACE: &'static str = "task_prefs";
    pub const TASKS_KEY: &'static str = "tasks";

    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saves the whole sequence, replacing what was stored before
    pub async fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string(tasks)?;
        self.store
            .put(Self::NAMESPACE, Self::TASKS_KEY, &json)
            .await?;
        debug!(count = tasks.len(), "Saved tasks");
        Ok(())
    }

    /// Loads the stored sequence; nothing stored yet yields an empty list
    pub async fn load(&self) -> Result<Vec<Task>> {
        let Some(json) = self.store.get(Self::NAMESPACE, Self::TASKS_KEY).await? else {
            return Ok(Vec::new());
        };
        let tasks: Vec<Task> = serde_json::from_str(&json)?;
        debug!(count = tasks.len(), "Loaded tasks");
        Ok(tasks)
    }
}
