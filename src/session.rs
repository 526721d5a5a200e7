//! Wires the task store to the display and to storage.
//!
//! Every sequence the store publishes is diffed against what the display
//! currently shows, saved, and handed back as a [`Refresh`].

use crate::{
    config::TaskpadConfig,
    domain::{diff, dispatch, ActionOutcome, ContextMenu, EditScript, SortOrder, Task, TaskAction},
    error::Result,
    storage::{FileStorage, TaskStorage},
    store::{TaskSequence, TaskStore},
};
use chrono::{DateTime, Duration, Utc};
use std::{path::Path, sync::Arc};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A published sequence and the edits that bring the display up to date with it
#[derive(Debug, Clone)]
pub struct Refresh {
    pub tasks: TaskSequence,
    pub script: EditScript,
}

/// Task list session: store, display state and persistence
pub struct TaskSession {
    store: TaskStore,
    storage: TaskStorage,
    config: TaskpadConfig,
    displayed: TaskSequence,
    published: mpsc::UnboundedReceiver<TaskSequence>,
    /// Published sequences not yet saved and shown, oldest first
    pending: Vec<TaskSequence>,
}

impl TaskSession {
    /// Opens a session backed by file storage under `project_root`
    pub async fn open_project(project_root: impl AsRef<Path>) -> Result<(Self, Vec<Refresh>)> {
        let root = project_root.as_ref();
        let config = TaskpadConfig::load(root).await?;
        let storage = TaskStorage::new(Arc::new(FileStorage::new(root)));
        Self::open(storage, config).await
    }

    /// Loads stored tasks (seeding the welcome tasks if enabled and nothing is
    /// stored) and returns the refreshes for the initial display
    pub async fn open(storage: TaskStorage, config: TaskpadConfig) -> Result<(Self, Vec<Refresh>)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut store = TaskStore::with_sort_order(config.default_sort);
        store.subscribe(move |tasks| {
            // The receiver lives as long as the session
            let _ = tx.send(Arc::clone(tasks));
        });

        let mut tasks = storage.load().await?;
        if tasks.is_empty() && config.seed_welcome_tasks {
            info!("No stored tasks, seeding welcome tasks");
            tasks = welcome_tasks(Utc::now());
        }
        store.replace_all(tasks);

        let mut session = Self {
            displayed: Arc::from(Vec::new()),
            store,
            storage,
            config,
            published: rx,
            pending: Vec::new(),
        };
        let refreshes = session.flush().await?;
        Ok((session, refreshes))
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn config(&self) -> &TaskpadConfig {
        &self.config
    }

    /// The sequence the display was last brought up to date with
    pub fn displayed(&self) -> TaskSequence {
        Arc::clone(&self.displayed)
    }

    /// Whether published changes are waiting for a successful save
    pub fn has_unsaved_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Options menu for the displayed row at `position`
    pub fn context_menu(&self, position: usize) -> Option<ContextMenu> {
        self.displayed
            .get(position)
            .map(|task| ContextMenu::new(task.clone(), position))
    }

    pub async fn add_task(&mut self, task: Task) -> Result<Vec<Refresh>> {
        self.store.add(task)?;
        self.flush().await
    }

    pub async fn update_task(&mut self, task: Task) -> Result<Vec<Refresh>> {
        self.store.update_by_id(task);
        self.flush().await
    }

    pub async fn remove_at(&mut self, position: usize) -> Result<Vec<Refresh>> {
        self.store.remove_at(position);
        self.flush().await
    }

    pub async fn sort_by(&mut self, order: SortOrder) -> Result<Vec<Refresh>> {
        self.store.sort_by(order);
        self.flush().await
    }

    /// Dispatches a row action and persists whatever it changed
    pub async fn handle(&mut self, action: TaskAction) -> Result<(ActionOutcome, Vec<Refresh>)> {
        let outcome = dispatch(&mut self.store, action, self.config.layout);
        let refreshes = self.flush().await?;
        Ok((outcome, refreshes))
    }

    /// Retries saving changes left over from a failed save
    pub async fn sync(&mut self) -> Result<Vec<Refresh>> {
        self.flush().await
    }

    /// Saves the newest published sequence, then advances the display through
    /// every pending sequence
    ///
    /// On a failed save nothing is shown and the sequences stay pending, so
    /// the display never runs ahead of storage.
    async fn flush(&mut self) -> Result<Vec<Refresh>> {
        while let Ok(tasks) = self.published.try_recv() {
            self.pending.push(tasks);
        }
        let Some(latest) = self.pending.last() else {
            return Ok(Vec::new());
        };
        if let Err(err) = self.storage.save(latest).await {
            warn!(pending = self.pending.len(), error = %err, "Saving tasks failed");
            return Err(err);
        }

        let mut refreshes = Vec::with_capacity(self.pending.len());
        for tasks in self.pending.drain(..) {
            let script = diff(&self.displayed, &tasks);
            debug!(edits = script.len(), len = tasks.len(), "Refreshing display");
            self.displayed = Arc::clone(&tasks);
            refreshes.push(Refresh { tasks, script });
        }
        Ok(refreshes)
    }
}

/// Tasks shown on first launch
pub fn welcome_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let due = now + Duration::days(2);
    vec![
        Task::new(
            "Welcome Task".to_string(),
            "This is your first task! Long-press or tap the options icon.".to_string(),
            "High".to_string(),
            due.timestamp_millis(),
        ),
        Task::new(
            "Explore App".to_string(),
            "Try adding a new task using the plus button.".to_string(),
            "Medium".to_string(),
            0,
        ),
    ]
}
