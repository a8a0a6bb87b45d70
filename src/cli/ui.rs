//! todo ui command implementation

use crate::error::Result;
use crate::service::TaskService;
use crate::storage::TaskStorage;

pub fn run<S: TaskStorage>(service: &mut TaskService<S>) -> Result<()> {
    tracing::debug!(tasks = service.len(), "starting terminal ui");
    crate::ui::run(service)
}
