use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::todos::{demo_seed_items, TodoItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Items the list holds before any user action.
    #[serde(default = "demo_seed_items")]
    pub seed_items: Vec<TodoItem>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_items: demo_seed_items(),
        }
    }
}

impl Config {
    /// Loads the config from `path` if given, otherwise from the default
    /// location when a file exists there, otherwise falls back to defaults.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path).await;
        }

        let default_path = Self::default_path()?;
        if !default_path.exists() {
            log::debug!(
                "No config at {}, using built-in defaults",
                default_path.display()
            );
            return Ok(Self::default());
        }

        Self::load_from(&default_path).await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        log::info!(
            "Loaded {} seed item(s) from {}",
            config.seed_items.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn default_path() -> Result<PathBuf> {
        let home = directories::UserDirs::new()
            .ok_or_else(|| anyhow::anyhow!("Failed to get home directory"))?
            .home_dir()
            .to_path_buf();

        Ok(home.join(".todolist").join("config.json"))
    }
}
