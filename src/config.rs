//! Project configuration loaded from `.taskpad/config.toml`.

use crate::{
    domain::{LayoutMode, SortOrder},
    error::{Result, TaskpadError},
};
use serde::{Deserialize, Serialize};
use std::{io::ErrorKind, path::Path};
use tokio::fs;
use tracing::debug;

const CONFIG_DIR: &str = ".taskpad";
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration; every field has a default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TaskpadConfig {
    /// Sort order applied when a session opens
    pub default_sort: SortOrder,
    /// How opened tasks are presented
    pub layout: LayoutMode,
    /// Seed the welcome tasks when nothing is stored yet
    pub seed_welcome_tasks: bool,
}

impl Default for TaskpadConfig {
    fn default() -> Self {
        Self {
            default_sort: SortOrder::None,
            layout: LayoutMode::SinglePane,
            seed_welcome_tasks: true,
        }
    }
}

impl TaskpadConfig {
    /// Loads `<project_root>/.taskpad/config.toml`, falling back to defaults when absent
    pub async fn load(project_root: impl AsRef<Path>) -> Result<Self> {
        let path = project_root.as_ref().join(CONFIG_DIR).join(CONFIG_FILE);

        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };

        let config = Self::from_toml_str(&contents).map_err(|err| match err {
            TaskpadError::ConfigError(msg) => {
                TaskpadError::ConfigError(format!("failed to parse {}: {}", path.display(), msg))
            }
            other => other,
        })?;
        debug!(path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| TaskpadError::ConfigError(err.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| TaskpadError::ConfigError(err.to_string()))
    }
}
