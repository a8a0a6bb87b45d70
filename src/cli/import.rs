//! todo import command implementation

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::service::TaskService;
use crate::storage::TaskStorage;
use crate::task::ImportOptions;

/// Options for `todo import`
pub struct Options {
    pub file: PathBuf,
    pub merge: bool,
    pub output: OutputOptions,
}

#[derive(Serialize)]
struct ImportReport {
    imported: usize,
    skipped: usize,
    mode: &'static str,
}

pub fn run<S: TaskStorage>(service: &mut TaskService<S>, options: Options) -> Result<()> {
    if !options.file.exists() {
        return Err(Error::FileNotFound(options.file));
    }
    let content = fs::read_to_string(&options.file)?;
    let data: serde_json::Value =
        serde_json::from_str(&content).map_err(|err| Error::ImportSyntax(err.to_string()))?;

    let replaced = if options.merge { 0 } else { service.len() };
    let result = service.import(
        &data,
        ImportOptions {
            merge: options.merge,
        },
    )?;

    let mode = if options.merge { "merge" } else { "replace" };
    let mut human = HumanOutput::new("Import completed");
    human.push_summary("Imported", format!("{} tasks", result.imported));
    human.push_summary("Skipped", format!("{} tasks (duplicates)", result.skipped));
    human.push_summary(
        "Mode",
        if options.merge {
            "merge (added to existing tasks)"
        } else {
            "replace (replaced all existing tasks)"
        },
    );

    if replaced > 0 {
        human.push_warning(format!("Replaced {replaced} existing tasks"));
    }

    let report = ImportReport {
        imported: result.imported,
        skipped: result.skipped,
        mode,
    };
    emit_success(options.output, "import", &report, Some(&human))
}
