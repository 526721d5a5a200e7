use crate::{
    error::Result,
    storage::{validate_name, KeyValueStore},
};
use async_trait::async_trait;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::debug;

/// File-based key-value storage: one file per key under `.taskpad/<namespace>/`
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const TASKPAD_DIR: &'static str = ".taskpad";
    const VALUE_EXTENSION: &'static str = "json";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::TASKPAD_DIR),
        }
    }

    /// Directory holding all namespaces
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn namespace_dir(&self, namespace: &str) -> PathBuf {
        self.root_path.join(namespace)
    }

    fn value_file(&self, namespace: &str, key: &str) -> Result<PathBuf> {
        validate_name("namespace", namespace)?;
        validate_name("key", key)?;
        Ok(self
            .namespace_dir(namespace)
            .join(format!("{}.{}", key, Self::VALUE_EXTENSION)))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStorage {
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let file_path = self.value_file(namespace, key)?;

        match fs::read_to_string(&file_path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let file_path = self.value_file(namespace, key)?;
        self.ensure_directory_exists(&self.namespace_dir(namespace))
            .await?;

        fs::write(&file_path, value).await?;
        debug!(path = %file_path.display(), bytes = value.len(), "Wrote value");
        Ok(())
    }

    async fn remove(&self, namespace: &str, key: &str) -> Result<()> {
        let file_path = self.value_file(namespace, key)?;

        match fs::remove_file(&file_path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_key_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert_eq!(storage.get("task_prefs", "tasks").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.put("task_prefs", "tasks", "[]").await.unwrap();

        assert_eq!(
            storage.get("task_prefs", "tasks").await.unwrap().as_deref(),
            Some("[]")
        );
        assert!(storage
            .root_path()
            .join("task_prefs")
            .join("tasks.json")
            .exists());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.put("ns", "key", "first").await.unwrap();
        storage.put("ns", "key", "second").await.unwrap();

        assert_eq!(
            storage.get("ns", "key").await.unwrap().as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn test_namespaces_are_separate() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.put("one", "key", "1").await.unwrap();
        storage.put("two", "key", "2").await.unwrap();

        assert_eq!(storage.get("one", "key").await.unwrap().as_deref(), Some("1"));
        assert_eq!(storage.get("two", "key").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.put("ns", "key", "value").await.unwrap();
        storage.remove("ns", "key").await.unwrap();
        assert_eq!(storage.get("ns", "key").await.unwrap(), None);

        // Removing again is fine
        storage.remove("ns", "key").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_escapes() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(storage.put("..", "key", "x").await.is_err());
        assert!(storage.put("ns", "../escape", "x").await.is_err());
        assert!(storage.get("", "key").await.is_err());
    }
}
