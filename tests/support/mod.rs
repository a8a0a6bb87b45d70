#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// An isolated data directory plus a config path that never exists unless a
/// test writes it.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir().join("tasks.json")
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        self.write_file("config.toml", contents)
    }

    pub fn todo_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("todo").expect("binary");
        cmd.env("TODO_DATA_DIR", self.data_dir())
            .env("TODO_CONFIG", self.config_path())
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run a command with `--json` and return the parsed envelope.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .todo_cmd()
            .arg("--json")
            .args(args)
            .output()
            .expect("run todo");
        assert!(
            output.status.success(),
            "todo {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("json output")
    }

    /// Create a task and return its id.
    pub fn create(&self, description: &str) -> String {
        let value = self.json(&["create", description]);
        value["data"]["task"]["id"]
            .as_str()
            .expect("task id")
            .to_string()
    }

    pub fn stored_tasks(&self) -> Vec<Value> {
        let content = fs::read_to_string(self.tasks_path()).expect("read tasks");
        serde_json::from_str(&content).expect("parse tasks")
    }
}
