//! Storage layer for todo
//!
//! The task service persists through the `TaskStorage` trait and never sees
//! the medium behind it. Two implementations ship:
//!
//! - `FileStorage`: a data directory with one file per slot
//! - `MemoryStorage`: in-process slots, for tests and embedding
//!
//! # Directory Structure
//!
//! ```text
//! <data_dir>/
//!   tasks.json        # Task records (JSON array)
//!   metadata.json     # {version, lastBackup}, refreshed on every save
//!   tasks.lock        # Advisory lock held while writing
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::task::{parse_timestamp, ExportData, PartialTask, Task, EXPORT_VERSION};

/// Name of the lock file inside the data directory
pub const LOCK_FILE: &str = "tasks.lock";

const SAVE_FAILED: &str = "Failed to save tasks";
const INVALID_IMPORT: &str = "Invalid import data";

/// Persistence capability used by the task service.
///
/// `load` never fails: an absent or unreadable slot is an empty list.
pub trait TaskStorage {
    /// Load every persisted task
    fn load(&self) -> Vec<Task>;

    /// Replace the persisted collection
    fn save(&mut self, tasks: &[Task]) -> Result<()>;

    /// Remove the persisted collection and its metadata
    fn clear(&mut self) -> Result<()>;

    /// Serialize the persisted collection as an export document
    fn export(&self) -> Result<String> {
        export_snapshot(self.load())
    }

    /// Parse an export document into tasks without touching storage
    fn import(&self, data: &str) -> Result<Vec<Task>> {
        decode_import(data)
    }
}

/// Informational record written next to the tasks slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageMetadata {
    pub version: String,
    pub last_backup: DateTime<Utc>,
}

impl StorageMetadata {
    fn now() -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            last_backup: Utc::now(),
        }
    }
}

// =========================================================================
// Slot encoding shared by every backend
// =========================================================================

fn encode_tasks(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

fn encode_metadata() -> Result<String> {
    Ok(serde_json::to_string_pretty(&StorageMetadata::now())?)
}

/// Rebuild a task from a persisted record.
///
/// Records without an id, a description, or a parsable `createdAt` are
/// unusable. An absent or unparsable `completedAt` means not completed.
fn restore_task(record: PartialTask) -> Option<Task> {
    let created_at = parse_timestamp(record.created_at.as_deref()?)?;
    let completed_at = record.completed_at.as_deref().and_then(parse_timestamp);
    let completed = record.completed.unwrap_or(false) && completed_at.is_some();

    Some(Task {
        id: record.id?,
        description: record.description?,
        completed,
        created_at,
        completed_at: completed_at.filter(|_| completed),
    })
}

fn restore_value(value: serde_json::Value) -> Option<Task> {
    serde_json::from_value::<PartialTask>(value)
        .ok()
        .and_then(restore_task)
}

/// Decode the tasks slot. `None` when the slot is not a JSON array.
fn decode_tasks(raw: &str) -> Option<Vec<Task>> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(err) => {
            tracing::warn!(error = %err, "failed to parse stored tasks");
            return None;
        }
    };

    let total = values.len();
    let tasks: Vec<Task> = values.into_iter().filter_map(restore_value).collect();
    if tasks.len() != total {
        tracing::warn!(
            dropped = total - tasks.len(),
            "dropped unreadable task records"
        );
    }
    Some(tasks)
}

fn export_snapshot(tasks: Vec<Task>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ExportData::new(tasks))?)
}

fn decode_import(data: &str) -> Result<Vec<Task>> {
    let invalid = || Error::Storage(INVALID_IMPORT.to_string());

    let document: serde_json::Value = serde_json::from_str(data).map_err(|err| {
        tracing::warn!(error = %err, "import payload is not JSON");
        invalid()
    })?;
    let records = document
        .get("tasks")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(invalid)?;

    records
        .iter()
        .cloned()
        .map(|value| restore_value(value).ok_or_else(invalid))
        .collect()
}

// =========================================================================
// File-backed storage
// =========================================================================

/// Task slots stored as files in one data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    tasks_file: String,
    metadata_file: String,
    lock_timeout_ms: u64,
}

impl FileStorage {
    /// Storage in `dir` with default file names
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let defaults = Config::default().storage;
        Self {
            dir: dir.into(),
            tasks_file: defaults.tasks_file,
            metadata_file: defaults.metadata_file,
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    /// Storage configured from `config`, with an optional directory override
    pub fn from_config(config: &Config, override_dir: Option<&Path>) -> Self {
        Self {
            dir: config.resolve_data_dir(override_dir),
            tasks_file: config.storage.tasks_file.trim().to_string(),
            metadata_file: config.storage.metadata_file.trim().to_string(),
            lock_timeout_ms: config.storage.lock_timeout_ms,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.dir.join(&self.tasks_file)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(&self.metadata_file)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.dir.join(LOCK_FILE)
    }

    /// Read the metadata slot, if present and well-formed
    pub fn read_metadata(&self) -> Option<StorageMetadata> {
        let content = fs::read_to_string(self.metadata_path()).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn write_slots(&self, tasks: &[Task]) -> Result<()> {
        let _lock = FileLock::acquire(self.lock_path(), self.lock_timeout_ms)?;
        lock::write_atomic(self.tasks_path(), encode_tasks(tasks)?.as_bytes())?;
        lock::write_atomic(self.metadata_path(), encode_metadata()?.as_bytes())?;
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

impl TaskStorage for FileStorage {
    fn load(&self) -> Vec<Task> {
        let path = self.tasks_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read tasks");
                return Vec::new();
            }
        };
        decode_tasks(&content).unwrap_or_default()
    }

    fn save(&mut self, tasks: &[Task]) -> Result<()> {
        self.write_slots(tasks).map_err(|err| {
            tracing::error!(path = %self.tasks_path().display(), error = %err, "failed to save tasks");
            Error::Storage(format!("{SAVE_FAILED}: {err}"))
        })?;
        tracing::debug!(count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if !self.dir.exists() {
            return Ok(());
        }
        let _lock = FileLock::acquire(self.lock_path(), self.lock_timeout_ms)?;
        remove_if_exists(&self.tasks_path())?;
        remove_if_exists(&self.metadata_path())?;
        Ok(())
    }
}

// =========================================================================
// In-memory storage
// =========================================================================

/// Slots kept in memory, encoded exactly as `FileStorage` encodes them
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    tasks_slot: Option<String>,
    metadata_slot: Option<String>,
    reject_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw tasks slot, as if another process had written it
    pub fn with_slot(raw: impl Into<String>) -> Self {
        Self {
            tasks_slot: Some(raw.into()),
            ..Self::default()
        }
    }

    /// Make every subsequent `save` fail, as a full medium would
    pub fn set_reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    pub fn tasks_slot(&self) -> Option<&str> {
        self.tasks_slot.as_deref()
    }

    pub fn metadata_slot(&self) -> Option<&str> {
        self.metadata_slot.as_deref()
    }
}

impl TaskStorage for MemoryStorage {
    fn load(&self) -> Vec<Task> {
        self.tasks_slot
            .as_deref()
            .and_then(decode_tasks)
            .unwrap_or_default()
    }

    fn save(&mut self, tasks: &[Task]) -> Result<()> {
        if self.reject_writes {
            tracing::error!("memory storage rejected write");
            return Err(Error::Storage(format!(
                "{SAVE_FAILED}: storage capacity exceeded"
            )));
        }
        self.tasks_slot = Some(encode_tasks(tasks)?);
        self.metadata_slot = Some(encode_metadata()?);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.tasks_slot = None;
        self.metadata_slot = None;
        Ok(())
    }
}
