//! todo delete command implementation

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::service::TaskService;
use crate::storage::TaskStorage;

/// Options for `todo delete`
pub struct Options {
    pub id: String,
    pub output: OutputOptions,
}

#[derive(Serialize)]
struct DeleteReport {
    id: String,
    description: Option<String>,
}

pub fn run<S: TaskStorage>(service: &mut TaskService<S>, options: Options) -> Result<()> {
    let description = service
        .get(&options.id)
        .map(|task| task.description.clone());

    service.delete(&options.id)?;

    let header = match description.as_deref() {
        Some(text) => format!("Deleted task: {text}"),
        None => "Deleted task".to_string(),
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("ID", options.id.clone());

    let report = DeleteReport {
        id: options.id,
        description,
    };
    emit_success(options.output, "delete", &report, Some(&human))
}
