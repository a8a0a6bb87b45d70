//! todo list command implementation

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::service::TaskService;
use crate::storage::TaskStorage;
use crate::task::{Task, TaskFilter};

/// Options for `todo list`
pub struct Options {
    pub filter: TaskFilter,
    pub output: OutputOptions,
}

#[derive(Serialize)]
struct ListReport<'a> {
    filter: &'static str,
    total: usize,
    tasks: &'a [Task],
}

/// clap rejects both flags together, so at most one is set here.
pub fn filter_from_flags(completed: bool, incomplete: bool) -> TaskFilter {
    match (completed, incomplete) {
        (true, _) => TaskFilter::Completed,
        (_, true) => TaskFilter::Incomplete,
        _ => TaskFilter::All,
    }
}

pub fn run<S: TaskStorage>(service: &TaskService<S>, options: Options) -> Result<()> {
    let tasks = service.list(options.filter);

    let mut human = if tasks.is_empty() {
        HumanOutput::new("No tasks found")
    } else {
        HumanOutput::new(format!(
            "Tasks ({} {})",
            tasks.len(),
            options.filter.label()
        ))
    };

    for (index, task) in tasks.iter().enumerate() {
        human.push_detail(format_row(index + 1, task));
    }
    if tasks.is_empty() && options.filter == TaskFilter::All {
        human.push_next_step("todo create <description>");
    }

    let report = ListReport {
        filter: options.filter.label(),
        total: tasks.len(),
        tasks: &tasks,
    };
    emit_success(options.output, "list", &report, Some(&human))
}

fn format_row(position: usize, task: &Task) -> String {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    let mut row = format!(
        "{position}. {mark} {}  (id {}, created {})",
        task.description,
        task.id,
        task.created_at.format("%Y-%m-%d")
    );
    if let Some(completed_at) = task.completed_at {
        row.push_str(&format!(", completed {}", completed_at.format("%Y-%m-%d")));
    }
    row
}
