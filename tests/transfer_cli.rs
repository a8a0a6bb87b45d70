mod support;

use std::fs;

use predicates::str::contains;
use serde_json::{json, Value};
use support::TestEnv;

fn export_document(env: &TestEnv) -> Value {
    let output = env.todo_cmd().arg("export").output().expect("run todo");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("export json")
}

#[test]
fn export_to_stdout_is_raw_document() {
    let env = TestEnv::new();
    env.create("one");
    env.create("two");

    let document = export_document(&env);
    assert_eq!(document["version"], "1.0.0");
    assert!(document["exportedAt"].is_string());
    assert_eq!(document["tasks"].as_array().unwrap().len(), 2);
    assert!(document.get("schema_version").is_none());
}

#[test]
fn export_text_format() {
    let env = TestEnv::new();
    let id = env.create("Ship it");
    env.create("Write notes");
    env.json(&["complete", &id]);

    env.todo_cmd()
        .args(["export", "--format", "text"])
        .assert()
        .success()
        .stdout(contains("# ToDo App Export"))
        .stdout(contains("Total tasks: 2"))
        .stdout(contains("[x] Ship it"))
        .stdout(contains("[ ] Write notes"))
        .stdout(contains("   Completed: "));
}

#[test]
fn export_format_defaults_from_config() {
    let env = TestEnv::new();
    env.write_config("[export]\nformat = \"text\"\n");
    env.create("configured");

    env.todo_cmd()
        .arg("export")
        .assert()
        .success()
        .stdout(contains("# ToDo App Export"));
}

#[test]
fn export_to_file_then_import_round_trips() {
    let env = TestEnv::new();
    env.create("alpha");
    env.create("beta");
    let before = env.json(&["list"])["data"]["tasks"].clone();

    let file = env.path().join("backup.json");
    env.todo_cmd()
        .arg("export")
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Exported 2 tasks to"));
    assert!(file.exists());

    env.create("gamma");

    let result = env.json(&["import", file.to_str().unwrap()]);
    assert_eq!(result["data"]["imported"], 2);
    assert_eq!(result["data"]["skipped"], 0);
    assert_eq!(result["data"]["mode"], "replace");
    assert_eq!(result["warnings"][0], "Replaced 3 existing tasks");

    let after = env.json(&["list"])["data"]["tasks"].clone();
    assert_eq!(after, before);
}

#[test]
fn merge_import_skips_existing_ids() {
    let env = TestEnv::new();
    let existing = env.create("existing");
    env.create("other");

    let payload = json!({
        "tasks": [
            {"id": existing, "description": "dup", "completed": false, "createdAt": "2024-01-01T00:00:00.000Z"},
            {"id": "2f1b6c3e-9d4a-4c1b-8e2f-0a1b2c3d4e5f", "description": "new one", "completed": false, "createdAt": "2024-01-02T00:00:00.000Z"},
            {"id": "7a9e1d2c-3b4f-4a5e-9c6d-1e2f3a4b5c6d", "description": "new two", "completed": true, "createdAt": "2024-01-03T00:00:00.000Z", "completedAt": "2024-01-04T00:00:00.000Z"}
        ],
        "exportedAt": "2024-01-05T00:00:00.000Z",
        "version": "1.0.0"
    });
    let file = env.write_file("merge.json", &payload.to_string());

    env.todo_cmd()
        .arg("import")
        .arg(&file)
        .arg("--merge")
        .assert()
        .success()
        .stdout(contains("- Imported: 2 tasks"))
        .stdout(contains("- Skipped: 1 tasks (duplicates)"))
        .stdout(contains("merge (added to existing tasks)"));

    let stored = env.stored_tasks();
    assert_eq!(stored.len(), 4);
    let kept = stored
        .iter()
        .find(|task| task["id"] == existing.as_str())
        .unwrap();
    assert_eq!(kept["description"], "existing");
}

#[test]
fn import_missing_file() {
    let env = TestEnv::new();
    let missing = env.path().join("nope.json");

    env.todo_cmd()
        .arg("import")
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(contains("File not found:"))
        .stderr(contains("nope.json"));
}

#[test]
fn import_invalid_json() {
    let env = TestEnv::new();
    let file = env.write_file("broken.json", "{ tasks: ");

    env.todo_cmd()
        .arg("import")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(contains("Invalid JSON format in import file"));
}

#[test]
fn import_bad_record_changes_nothing() {
    let env = TestEnv::new();
    env.create("survivor");
    let before = fs::read_to_string(env.tasks_path()).unwrap();

    let payload = json!({
        "tasks": [
            {"id": "not-a-uuid", "description": "bad", "completed": false, "createdAt": "2024-01-01T00:00:00Z"}
        ]
    });
    let file = env.write_file("bad.json", &payload.to_string());

    env.todo_cmd()
        .arg("import")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(contains("Invalid import data"));

    assert_eq!(fs::read_to_string(env.tasks_path()).unwrap(), before);
}

#[test]
fn replace_import_into_empty_store_has_no_warning() {
    let env = TestEnv::new();
    let payload = json!({
        "tasks": [
            {"id": "2f1b6c3e-9d4a-4c1b-8e2f-0a1b2c3d4e5f", "description": "fresh", "completed": false, "createdAt": "2024-01-02T00:00:00.000Z"}
        ]
    });
    let file = env.write_file("fresh.json", &payload.to_string());

    let result = env.json(&["import", file.to_str().unwrap()]);
    assert_eq!(result["data"]["imported"], 1);
    assert!(result.get("warnings").is_none());

    env.create("later");
    env.todo_cmd()
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Warnings:"))
        .stdout(contains("- Replaced 2 existing tasks"));
}
