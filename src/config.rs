//! Configuration loading and management
//!
//! Handles parsing of `.taskdeck.toml` configuration files.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::lock::DEFAULT_LOCK_TIMEOUT_MS;
use crate::project::ListOrder;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".taskdeck.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Project defaults
    #[serde(default)]
    pub projects: ProjectsConfig,
}

/// Where and how the project collection is persisted
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Data file; relative paths resolve against the config file's directory
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// How long to wait for the data file locks
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

/// Project defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectsConfig {
    /// Color given to new projects created without one
    #[serde(default)]
    pub default_color: String,

    /// Order used by `project list`
    #[serde(default)]
    pub list_order: ListOrder,
}

/// Platform data file, or `./data/projects.json` when no home is known
pub fn default_data_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "taskdeck")
        .map(|dirs| dirs.data_dir().join("projects.json"))
        .unwrap_or_else(|| PathBuf::from("data").join("projects.json"))
}

impl Config {
    /// Load configuration from a `.taskdeck.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content).map_err(|err| {
            Error::InvalidConfig(format!("{}: {}", path.display(), err.message()))
        })?;
        config.validate()?;
        if let (Some(data), Some(base)) = (config.storage.path.as_mut(), path.parent()) {
            if data.is_relative() {
                *data = base.join(&*data);
            }
        }
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_else(|err| {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring invalid config");
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Configured data file, or the platform default
    pub fn data_path(&self) -> PathBuf {
        self.storage.path.clone().unwrap_or_else(default_data_path)
    }

    /// Color for a new project: the explicit one, else the configured default
    pub fn color_or_default(&self, color: Option<String>) -> Option<String> {
        color.or_else(|| {
            let default = self.projects.default_color.trim();
            (!default.is_empty()).then(|| default.to_string())
        })
    }

    fn validate(&self) -> Result<()> {
        if self.storage.lock_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "storage.lock_timeout_ms must be > 0".to_string(),
            ));
        }
        if let Some(path) = &self.storage.path {
            if path.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(
                    "storage.path cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
