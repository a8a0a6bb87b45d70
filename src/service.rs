//! The task service: the in-memory task list and its persistence.
//!
//! Every mutating operation runs validate → mutate → save before returning.
//! The service is an ordinary value; construct one at the entry point and
//! lend it to whichever surface needs it.

use chrono::Utc;

use crate::error::{Error, Result};
use crate::storage::TaskStorage;
use crate::task::{
    generate_task_id, ExportData, ImportOptions, ImportResult, PartialTask, Task, TaskFilter,
    UpdateTaskRequest,
};
use crate::validation::{self, INVALID_TASK_ID};

#[derive(Debug)]
pub struct TaskService<S: TaskStorage> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: TaskStorage> TaskService<S> {
    /// Build a service over `storage`, loading whatever it holds.
    pub fn new(storage: S) -> Self {
        let tasks = storage.load();
        tracing::debug!(count = tasks.len(), "loaded tasks");
        Self { storage, tasks }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Matching tasks, newest first. Tasks created at the same instant keep
    /// insertion order.
    pub fn list(&self, filter: TaskFilter) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        tasks.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Create a task from `description`.
    ///
    /// If the save fails the new task is removed again, so the in-memory list
    /// still matches what was last persisted.
    pub fn create(&mut self, description: &str) -> Result<Task> {
        let validation = validation::validate_description(description);
        if let Some(message) = validation.first_error() {
            return Err(Error::Validation(message.to_string()));
        }

        let mut task = Task::new(description.trim());
        while self.get(&task.id).is_some() {
            task.id = generate_task_id();
        }

        self.tasks.push(task.clone());
        if let Err(err) = self.persist() {
            self.tasks.pop();
            return Err(err);
        }

        tracing::info!(id = %task.id, "created task");
        Ok(task)
    }

    /// Apply `request` to the task with `id` and persist.
    pub fn update(&mut self, id: &str, request: UpdateTaskRequest) -> Result<Task> {
        let index = self.position(id)?;

        if let Some(completed) = request.completed {
            self.tasks[index].set_completed(completed, Utc::now());
        }

        let task = self.tasks[index].clone();
        self.persist()?;
        tracing::info!(id = %task.id, completed = task.completed, "updated task");
        Ok(task)
    }

    /// Remove the task with `id` and persist.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        self.tasks.remove(index);
        self.persist()?;
        tracing::info!(id, "deleted task");
        Ok(())
    }

    /// Snapshot of every task, newest first.
    pub fn export(&self) -> ExportData {
        ExportData::new(self.list(TaskFilter::All))
    }

    /// Import the `tasks` array of an export document.
    ///
    /// The whole batch is validated before anything changes; one bad record
    /// rejects all of them. Without `merge` the current list is discarded
    /// first. Records whose id is already present are skipped.
    pub fn import(
        &mut self,
        data: &serde_json::Value,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let records = data
            .get("tasks")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| Error::ImportFormat("missing tasks array".to_string()))?;

        let incoming = records
            .iter()
            .enumerate()
            .map(|(index, value)| {
                decode_import_record(value).map_err(|reason| {
                    tracing::warn!(index, %reason, "rejected import record");
                    Error::ImportFormat(format!("task {index}: {reason}"))
                })
            })
            .collect::<Result<Vec<Task>>>()?;

        if !options.merge {
            self.tasks.clear();
        }

        let mut result = ImportResult::default();
        for task in incoming {
            if self.get(&task.id).is_some() {
                result.skipped += 1;
            } else {
                self.tasks.push(task);
                result.imported += 1;
            }
        }

        self.persist()?;
        tracing::info!(
            imported = result.imported,
            skipped = result.skipped,
            merge = options.merge,
            "imported tasks"
        );
        Ok(result)
    }

    /// Drop every task, in memory and in storage.
    pub fn clear_all(&mut self) -> Result<()> {
        self.tasks.clear();
        self.storage.clear()
    }

    /// Index of the task with `id`. A miss reports a malformed id before
    /// reporting an absent one.
    fn position(&self, id: &str) -> Result<usize> {
        if let Some(index) = self.tasks.iter().position(|task| task.id == id) {
            return Ok(index);
        }

        if !validation::is_valid_task_id(id) {
            return Err(Error::Validation(INVALID_TASK_ID.to_string()));
        }
        Err(Error::NotFound(id.to_string()))
    }

    fn persist(&mut self) -> Result<()> {
        self.storage.save(&self.tasks)
    }
}

fn decode_import_record(value: &serde_json::Value) -> std::result::Result<Task, String> {
    if !value.is_object() {
        return Err("record is not an object".to_string());
    }
    let record: PartialTask =
        serde_json::from_value(value.clone()).map_err(|err| err.to_string())?;

    let validation = validation::validate_task(&record);
    if let Some(message) = validation.first_error() {
        return Err(message.to_string());
    }

    record.into_task()
}
