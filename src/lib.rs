//! todo - a small task tracker
//!
//! This library provides the core functionality for the `todo` CLI and its
//! terminal UI.
//!
//! # Core Concepts
//!
//! - **Task**: a description plus a completion flag, identified by a UUID v4
//! - **Task service**: the authoritative in-memory list; every change is
//!   validated, applied, then persisted
//! - **Storage**: a swappable backend behind the `TaskStorage` trait
//! - **Export/import**: versioned JSON snapshots with merge-by-id
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `config.toml`
//! - `error`: Error types and result aliases
//! - `export`: Export document rendering (JSON and text)
//! - `lock`: File locking and atomic writes
//! - `output`: Shared human/JSON output formatting
//! - `service`: The task service
//! - `storage`: `TaskStorage` with file and in-memory backends
//! - `task`: Task model and request types
//! - `ui`: Interactive terminal UI
//! - `validation`: Description and identifier checks

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod lock;
pub mod output;
pub mod service;
pub mod storage;
pub mod task;
pub mod ui;
pub mod validation;

pub use error::{Error, Result};
pub use service::TaskService;
