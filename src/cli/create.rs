//! todo create command implementation

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::service::TaskService;
use crate::storage::TaskStorage;
use crate::task::Task;

/// Options for `todo create`
pub struct Options {
    pub description: String,
    pub output: OutputOptions,
}

#[derive(Serialize)]
struct CreateReport<'a> {
    task: &'a Task,
}

pub fn run<S: TaskStorage>(service: &mut TaskService<S>, options: Options) -> Result<()> {
    let task = service.create(&options.description)?;

    let mut human = HumanOutput::new(format!("Created task: {}", task.description));
    human.push_summary("ID", task.id.clone());
    human.push_summary("Created", task.created_at.to_rfc3339());
    human.push_next_step(format!("todo complete {}", task.id));

    emit_success(options.output, "create", &CreateReport { task: &task }, Some(&human))
}
