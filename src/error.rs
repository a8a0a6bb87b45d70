//! Error types for todo
//!
//! Every failure exits the CLI with status 1. The variant still matters for
//! JSON output, where `kind()` tells callers which category they hit.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the todo CLI
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Main error type for todo operations
#[derive(Error, Debug)]
pub enum Error {
    // Rejected input
    #[error("{0}")]
    Validation(String),

    #[error("Task with ID {0} not found")]
    NotFound(String),

    #[error("Invalid import data")]
    ImportFormat(String),

    #[error("Invalid JSON format in import file")]
    ImportSyntax(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Persistence failures
    #[error("{0}")]
    Storage(String),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        exit_codes::FAILURE
    }

    /// Short machine-readable category name
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation",
            Error::NotFound(_) => "not_found",
            Error::ImportFormat(_) | Error::ImportSyntax(_) => "import_format",
            Error::InvalidArgument(_) | Error::InvalidConfig(_) | Error::FileNotFound(_) => {
                "user_error"
            }
            Error::Storage(_) | Error::LockFailed(_) => "storage",
            Error::Io(_) | Error::Json(_) | Error::TomlParse(_) => "operation_failed",
        }
    }

    /// Structured details for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::NotFound(id) => Some(serde_json::json!({ "id": id })),
            Error::ImportFormat(reason) | Error::ImportSyntax(reason) => {
                Some(serde_json::json!({ "reason": reason }))
            }
            Error::FileNotFound(path) => Some(serde_json::json!({
                "path": path.to_string_lossy(),
            })),
            Error::InvalidConfig(message) => Some(serde_json::json!({ "message": message })),
            Error::LockFailed(path) => Some(serde_json::json!({
                "path": path.to_string_lossy(),
            })),
            _ => None,
        }
    }
}

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            kind: err.kind(),
            details: err.details(),
        }
    }
}
