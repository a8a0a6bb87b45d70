//! todo complete command implementation

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::service::TaskService;
use crate::storage::TaskStorage;
use crate::task::{Task, UpdateTaskRequest};

/// Options for `todo complete`
pub struct Options {
    pub id: String,
    pub toggle: bool,
    pub output: OutputOptions,
}

#[derive(Serialize)]
struct CompleteReport<'a> {
    task: &'a Task,
}

pub fn run<S: TaskStorage>(service: &mut TaskService<S>, options: Options) -> Result<()> {
    // An unknown id still goes through `update` so the error matches
    let completed = if options.toggle {
        service
            .get(&options.id)
            .map_or(true, |task| !task.completed)
    } else {
        true
    };

    let task = service.update(&options.id, UpdateTaskRequest::completed(completed))?;

    let state = if task.completed { "completed" } else { "incomplete" };
    let mut human = HumanOutput::new(format!("Marked task as {state}: {}", task.description));
    human.push_summary("ID", task.id.clone());
    if let Some(completed_at) = task.completed_at {
        human.push_summary("Completed at", completed_at.to_rfc3339());
    }

    emit_success(options.output, "complete", &CompleteReport { task: &task }, Some(&human))
}
