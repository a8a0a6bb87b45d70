//! Description and identifier checks.
//!
//! Everything here is pure: the same input always produces the same
//! `ValidationResult`, and nothing touches storage.

use uuid::{Uuid, Variant};

use crate::task::PartialTask;

/// Maximum description length, counted in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

pub const EMPTY_DESCRIPTION: &str = "Task description cannot be empty";
pub const DESCRIPTION_TOO_LONG: &str = "Task description must be less than 500 characters";
pub const INVALID_TASK_ID: &str = "Task ID must be a valid UUID";

/// Outcome of a validation pass. Errors accumulate in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    fn push(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// Check a task description.
///
/// The emptiness check looks at the trimmed text while the length check looks
/// at the raw text, so `"   "` is empty and 501 spaces are both empty and too
/// long.
pub fn validate_description(description: &str) -> ValidationResult {
    let mut result = ValidationResult::default();

    if description.trim().is_empty() {
        result.push(EMPTY_DESCRIPTION);
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        result.push(DESCRIPTION_TOO_LONG);
    }

    result
}

/// Check whichever fields of a partial task are present.
pub fn validate_task(task: &PartialTask) -> ValidationResult {
    let mut result = ValidationResult::default();

    if let Some(id) = task.id.as_deref() {
        if !is_valid_task_id(id) {
            result.push(INVALID_TASK_ID);
        }
    }

    if let Some(description) = task.description.as_deref() {
        result
            .errors
            .extend(validate_description(description).errors);
    }

    result
}

/// True for a lowercase random (version 4) UUID in hyphenated form.
pub fn is_valid_task_id(id: &str) -> bool {
    let Ok(uuid) = Uuid::try_parse(id) else {
        return false;
    };

    // try_parse also takes the simple, braced and urn forms
    uuid.get_version_num() == 4
        && uuid.get_variant() == Variant::RFC4122
        && uuid.hyphenated().to_string() == id
}
