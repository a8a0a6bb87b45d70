//! Configuration loading and management
//!
//! Handles parsing of the `config.toml` file that lives in the platform
//! config directory (or wherever `--config` points).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::export::ExportFormat;
use crate::lock::DEFAULT_LOCK_TIMEOUT_MS;

/// File name of the configuration inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Fallback data directory when no platform directory can be determined
pub const FALLBACK_DATA_DIR: &str = ".todo";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,
}

/// Where and how tasks are persisted
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the task slots; platform data dir when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// File name of the tasks slot
    #[serde(default = "default_tasks_file")]
    pub tasks_file: String,

    /// File name of the metadata slot
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,

    /// How long a save waits for the storage lock
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

fn default_tasks_file() -> String {
    "tasks.json".to_string()
}

fn default_metadata_file() -> String {
    "metadata.json".to_string()
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            tasks_file: default_tasks_file(),
            metadata_file: default_metadata_file(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

/// Export defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExportConfig {
    /// Format used by `todo export` when `--format` is not given
    #[serde(default)]
    pub format: ExportFormat,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "todo")
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path` (or the default location), falling back
    /// to defaults when the file is missing or invalid
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Self::default(),
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Default config file location in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Pick the data directory: explicit override, then config, then the
    /// platform data dir, then `./.todo`
    pub fn resolve_data_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir.to_path_buf();
        }
        if let Some(dir) = self.storage.data_dir.as_ref() {
            return dir.clone();
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
    }

    fn validate(&self) -> Result<()> {
        self.storage.validate()
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        validate_file_name(&self.tasks_file, "storage.tasks_file")?;
        validate_file_name(&self.metadata_file, "storage.metadata_file")?;

        if self.tasks_file.trim() == self.metadata_file.trim() {
            return Err(Error::InvalidConfig(
                "storage.tasks_file and storage.metadata_file must differ".to_string(),
            ));
        }

        if self.lock_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "storage.lock_timeout_ms must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_file_name(name: &str, field: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidConfig(format!("{field} cannot be empty")));
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(Error::InvalidConfig(format!(
            "{field} must be a file name, not a path: '{trimmed}'"
        )));
    }
    Ok(())
}
