use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Unique identifier for a task (a random UUID string for new tasks)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a fresh random TaskId
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for TaskId {
    type Err = crate::error::TaskpadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Stored ids are opaque, only blank ones are rejected
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(crate::error::TaskpadError::InvalidTaskId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The conventional priority levels offered when creating a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank of a priority, lower ranks sort first
    pub fn rank(self) -> u32 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Rank of a raw priority string; unrecognized values rank last
    pub fn rank_of(raw: &str) -> u32 {
        raw.parse::<Priority>()
            .map(Priority::rank)
            .unwrap_or(u32::MAX)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!(
                "Invalid priority '{}'. Valid priorities: High, Medium, Low",
                s
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// A single to-do item
///
/// Two tasks are the same item when their ids match; `PartialEq` compares
/// every field and tells whether the item's content changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default, rename = "isDone", alias = "done")]
    pub done: bool,
    /// Milliseconds since epoch, `0` when the task has no due date
    #[serde(default)]
    pub due_date: i64,
}

impl Task {
    /// Creates a new pending task with a fresh id
    pub fn new(title: String, description: String, priority: String, due_date: i64) -> Self {
        Self::with_id(TaskId::new(), title, description, priority, due_date)
    }

    /// Creates a task with an empty description and no due date
    pub fn with_priority(title: String, priority: String) -> Self {
        Self::new(title, String::new(), priority, 0)
    }

    /// Creates a pending task with a caller-supplied id
    pub fn with_id(
        id: TaskId,
        title: String,
        description: String,
        priority: String,
        due_date: i64,
    ) -> Self {
        Self {
            id,
            title,
            description,
            priority,
            done: false,
            due_date,
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    /// True when both values describe the same logical task
    pub fn is_same_item(&self, other: &Task) -> bool {
        self.id == other.id
    }

    pub fn has_due_date(&self) -> bool {
        self.due_date != 0
    }

    /// The due date as a UTC timestamp, if one is set
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        if !self.has_due_date() {
            return None;
        }
        Utc.timestamp_millis_opt(self.due_date).single()
    }

    pub fn set_due_at(&mut self, due: DateTime<Utc>) {
        self.due_date = due.timestamp_millis();
    }

    pub fn clear_due_date(&mut self) {
        self.due_date = 0;
    }

    /// Flips the completion flag and returns the new value
    pub fn toggle_done(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }

    /// Sort rank of this task's priority (see [`Priority::rank_of`])
    pub fn priority_rank(&self) -> u32 {
        Priority::rank_of(&self.priority)
    }
}
