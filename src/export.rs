//! Rendering of export snapshots.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::task::ExportData;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Text,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Text => "text",
        }
    }
}

/// Render `data` in the requested format.
pub fn render(data: &ExportData, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        ExportFormat::Text => Ok(render_text(data)),
    }
}

/// Plain-text export: a header block, then one numbered entry per task.
pub fn render_text(data: &ExportData) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "# ToDo App Export");
    let _ = writeln!(out, "Exported: {}", data.exported_at);
    let _ = writeln!(out, "Version: {}", data.version);
    let _ = writeln!(out, "Total tasks: {}", data.tasks.len());
    out.push('\n');

    for (index, task) in data.tasks.iter().enumerate() {
        let status = if task.completed { "[x]" } else { "[ ]" };
        let _ = writeln!(out, "{}. {} {}", index + 1, status, task.description);
        let _ = writeln!(out, "   Created: {}", task.created_at.to_rfc3339());
        if let Some(completed_at) = task.completed_at {
            let _ = writeln!(out, "   Completed: {}", completed_at.to_rfc3339());
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Task, EXPORT_VERSION};
    use chrono::Utc;

    fn sample() -> ExportData {
        let mut done = Task::new("Ship release");
        done.set_completed(true, Utc::now());
        ExportData {
            tasks: vec![done, Task::new("Write notes")],
            exported_at: "2024-05-01T12:00:00+00:00".to_string(),
            version: EXPORT_VERSION.to_string(),
        }
    }

    #[test]
    fn text_has_header_and_numbered_entries() {
        let text = render_text(&sample());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# ToDo App Export");
        assert_eq!(lines[1], "Exported: 2024-05-01T12:00:00+00:00");
        assert_eq!(lines[2], "Version: 1.0.0");
        assert_eq!(lines[3], "Total tasks: 2");
        assert!(text.contains("1. [x] Ship release"));
        assert!(text.contains("2. [ ] Write notes"));
        assert_eq!(text.matches("   Created: ").count(), 2);
        assert_eq!(text.matches("   Completed: ").count(), 1);
    }

    #[test]
    fn text_for_empty_export() {
        let data = ExportData {
            tasks: Vec::new(),
            exported_at: "now".to_string(),
            version: EXPORT_VERSION.to_string(),
        };
        assert!(render_text(&data).ends_with("Total tasks: 0\n\n"));
    }

    #[test]
    fn json_render_parses_back() {
        let data = sample();
        let rendered = render(&data, ExportFormat::Json).unwrap();
        let parsed: ExportData = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, data);
    }
}
