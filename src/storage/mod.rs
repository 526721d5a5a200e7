use crate::error::{Result, TaskpadError};
use async_trait::async_trait;

pub mod credentials;
pub mod file_storage;
pub mod memory_storage;
pub mod task_storage;

pub use credentials::CredentialStore;
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use task_storage::TaskStorage;

/// Local key-value storage, grouped into namespaces
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value, `None` if the key was never written
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one
    async fn put(&self, namespace: &str, key: &str, value: &str) -> Result<()>;

    /// Deletes a value; deleting a missing key is not an error
    async fn remove(&self, namespace: &str, key: &str) -> Result<()>;
}

/// Rejects names that are empty or could escape their namespace directory
pub(crate) fn validate_name(kind: &str, name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.contains('\0');
    if invalid {
        return Err(TaskpadError::StorageError(format!(
            "Invalid {} name: {:?}",
            kind, name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("key", "tasks").is_ok());
        assert!(validate_name("namespace", "task_prefs").is_ok());
        assert!(validate_name("key", "").is_err());
        assert!(validate_name("key", "..").is_err());
        assert!(validate_name("key", "a/b").is_err());
        assert!(validate_name("key", "a\\b").is_err());
    }
}
