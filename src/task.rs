//! Task model for todo.
//!
//! A task is a short description plus a completion flag. `completed_at` is
//! present exactly when `completed` is true; `set_completed` is the only way
//! the pair changes.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version string stamped on exports and on the storage metadata slot.
pub const EXPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a fresh, incomplete task. The description is stored as given;
    /// callers validate and trim first.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: generate_task_id(),
            description: description.into(),
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Move between the incomplete and complete states.
    ///
    /// Setting `true` always restamps `completed_at`, even if the task was
    /// already complete.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.completed = completed;
        self.completed_at = if completed { Some(now) } else { None };
    }
}

/// Generate a new task identifier (lowercase hyphenated UUID v4).
pub fn generate_task_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parse an RFC 3339 / ISO-8601 timestamp into UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl TaskFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Completed => task.completed,
            TaskFilter::Incomplete => !task.completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskFilter::All => "total",
            TaskFilter::Completed => "completed",
            TaskFilter::Incomplete => "incomplete",
        }
    }
}

/// Fields `update` may change. Only completion today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub tasks: Vec<Task>,
    pub exported_at: String,
    pub version: String,
}

impl ExportData {
    /// Stamp `tasks` with the current time, e.g. `2024-03-03T10:15:30.123Z`.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: EXPORT_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Keep existing tasks and only add unseen ids.
    pub merge: bool,
}

/// A task record as it arrives from outside: every field optional and every
/// timestamp still a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTask {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl PartialTask {
    /// Turn an already validated record into a `Task`.
    ///
    /// Missing required fields and unparsable timestamps are rejected with a
    /// short reason. `completed: true` without `completedAt` becomes an
    /// incomplete task.
    pub fn into_task(self) -> std::result::Result<Task, String> {
        let id = self.id.ok_or("missing id")?;
        let description = self.description.ok_or("missing description")?;
        let created_raw = self.created_at.ok_or("missing createdAt")?;
        let created_at = parse_timestamp(&created_raw)
            .ok_or_else(|| format!("unparsable createdAt '{created_raw}'"))?;
        let completed_at = match self.completed_at {
            Some(raw) => Some(
                parse_timestamp(&raw).ok_or_else(|| format!("unparsable completedAt '{raw}'"))?,
            ),
            None => None,
        };
        let completed = self.completed.unwrap_or(false) && completed_at.is_some();

        Ok(Task {
            id,
            description: description.trim().to_string(),
            completed,
            created_at,
            completed_at: completed_at.filter(|_| completed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::is_valid_task_id;

    #[test]
    fn export_stamp_is_utc_with_milliseconds() {
        let data = ExportData::new(Vec::new());
        let stamp = &data.exported_at;

        // YYYY-MM-DDTHH:MM:SS.mmmZ
        assert_eq!(stamp.len(), 24, "{stamp}");
        assert!(stamp.ends_with('Z'), "{stamp}");
        assert_eq!(&stamp[19..20], ".");
        assert!(parse_timestamp(stamp).is_some());
        assert_eq!(data.version, EXPORT_VERSION);
    }

    #[test]
    fn new_task_starts_incomplete() {
        let before = Utc::now();
        let task = Task::new("Write report");
        assert!(is_valid_task_id(&task.id));
        assert_eq!(task.description, "Write report");
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
        assert!(task.created_at >= before);
    }

    #[test]
    fn set_completed_keeps_pair_consistent() {
        let mut task = Task::new("Walk dog");
        let now = Utc::now();

        task.set_completed(true, now);
        assert!(task.completed);
        assert_eq!(task.completed_at, Some(now));

        task.set_completed(false, now);
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn serializes_with_camel_case_and_omits_missing_completion() {
        let task = Task::new("Pay rent");
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("completedAt").is_none());
        assert_eq!(value["completed"], serde_json::Value::Bool(false));
    }

    #[test]
    fn filter_matches_completion() {
        let mut done = Task::new("done");
        done.set_completed(true, Utc::now());
        let open = Task::new("open");

        assert!(TaskFilter::All.matches(&done) && TaskFilter::All.matches(&open));
        assert!(TaskFilter::Completed.matches(&done));
        assert!(!TaskFilter::Completed.matches(&open));
        assert!(TaskFilter::Incomplete.matches(&open));
        assert!(!TaskFilter::Incomplete.matches(&done));
    }

    #[test]
    fn partial_task_converts_with_parsed_timestamps() {
        let record: PartialTask = serde_json::from_value(serde_json::json!({
            "id": "123e4567-e89b-42d3-a456-426614174000",
            "description": "  Imported  ",
            "completed": true,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "completedAt": "2024-01-02T10:30:00Z",
        }))
        .unwrap();

        let task = record.into_task().unwrap();
        assert_eq!(task.description, "Imported");
        assert!(task.completed);
        assert_eq!(
            task.completed_at,
            parse_timestamp("2024-01-02T10:30:00Z")
        );
    }

    #[test]
    fn partial_task_completed_without_timestamp_is_incomplete() {
        let record = PartialTask {
            id: Some(generate_task_id()),
            description: Some("x".to_string()),
            completed: Some(true),
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
            completed_at: None,
        };
        let task = record.into_task().unwrap();
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn partial_task_rejects_bad_created_at() {
        let record = PartialTask {
            id: Some(generate_task_id()),
            description: Some("x".to_string()),
            created_at: Some("yesterday".to_string()),
            ..PartialTask::default()
        };
        let err = record.into_task().unwrap_err();
        assert!(err.contains("createdAt"));
    }

    #[test]
    fn partial_task_requires_id() {
        let record = PartialTask {
            description: Some("x".to_string()),
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
            ..PartialTask::default()
        };
        assert_eq!(record.into_task().unwrap_err(), "missing id");
    }
}
