//! todo export command implementation
//!
//! Without `--file` the rendered document itself goes to stdout, even with
//! `--json`, so `todo export > backup.json` can be fed back to `todo import`.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::export::{self, ExportFormat};
use crate::lock;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::service::TaskService;
use crate::storage::TaskStorage;

/// Options for `todo export`
pub struct Options {
    pub file: Option<PathBuf>,
    pub format: ExportFormat,
    pub output: OutputOptions,
}

#[derive(Serialize)]
struct ExportReport {
    file: PathBuf,
    format: &'static str,
    exported: usize,
}

pub fn run<S: TaskStorage>(service: &TaskService<S>, options: Options) -> Result<()> {
    let data = service.export();
    let rendered = export::render(&data, options.format)?;

    let Some(file) = options.file else {
        print!("{rendered}");
        if !rendered.ends_with('\n') {
            println!();
        }
        return Ok(());
    };

    lock::write_atomic(&file, rendered.as_bytes())?;
    tracing::info!(path = %file.display(), count = data.tasks.len(), "exported tasks");

    let mut human = HumanOutput::new(format!(
        "Exported {} tasks to {}",
        data.tasks.len(),
        file.display()
    ));
    human.push_summary("Format", options.format.as_str());

    let report = ExportReport {
        file,
        format: options.format.as_str(),
        exported: data.tasks.len(),
    };
    emit_success(options.output, "export", &report, Some(&human))
}
