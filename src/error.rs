use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskpadError>;

#[derive(Debug, Error)]
pub enum TaskpadError {
    #[error("Task with ID {0} already exists")]
    DuplicateTaskId(String),

    #[error("Invalid task ID format: {0}")]
    InvalidTaskId(String),

    #[error("Invalid sort order '{0}'. Valid orders: none, priority, due-date, name")]
    InvalidSortOrder(String),

    #[error("Invalid credentials or account not registered")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
