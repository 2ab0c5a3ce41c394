#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A scratch directory holding one data file and optional config
pub struct TestBoard {
    dir: TempDir,
}

impl TestBoard {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_path(&self) -> PathBuf {
        self.dir.path().join("projects.json")
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read_data(&self) -> Value {
        let raw = fs::read_to_string(self.data_path()).expect("read data file");
        serde_json::from_str(&raw).expect("data file json")
    }

    /// `taskdeck` running inside the scratch dir against its data file
    pub fn cmd(&self) -> Command {
        let mut cmd = taskdeck_cmd();
        cmd.current_dir(self.path())
            .env("TASKDECK_DATA", self.data_path());
        cmd
    }

    /// Run a command with `--json`, assert success and return `data`
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(args)
            .arg("--json")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let value: Value = serde_json::from_slice(&output).expect("json output");
        assert_eq!(value["status"], "success");
        value["data"].clone()
    }

    /// Run a command with `--json`, assert it exits with `code`, return `error`
    pub fn json_error(&self, args: &[&str], code: i32) -> Value {
        let output = self
            .cmd()
            .args(args)
            .arg("--json")
            .assert()
            .code(code)
            .get_output()
            .stdout
            .clone();
        let value: Value = serde_json::from_slice(&output).expect("json error output");
        assert_eq!(value["status"], "error");
        value["error"].clone()
    }

    pub fn new_project(&self, name: &str) -> String {
        id_of(&self.json(&["project", "new", name]))
    }

    pub fn add_task(&self, project: &str, title: &str) -> String {
        id_of(&self.json(&["task", "add", project, title]))
    }

    pub fn add_subtask(&self, project: &str, task: &str, title: &str) -> String {
        id_of(&self.json(&["subtask", "add", project, task, title]))
    }

    pub fn show(&self, project: &str) -> Value {
        self.json(&["project", "show", project])
    }
}

pub fn taskdeck_cmd() -> Command {
    let mut cmd = Command::cargo_bin("taskdeck").expect("binary");
    cmd.env_remove("TASKDECK_DATA")
        .env_remove("TASKDECK_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

pub fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("id").to_string()
}

/// Titles of a JSON task or subtask array, in array order
pub fn titles(items: &Value) -> Vec<String> {
    items
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["title"].as_str().expect("title").to_string())
        .collect()
}

/// `order` fields of a JSON task or subtask array, in array order
pub fn orders(items: &Value) -> Vec<u64> {
    items
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["order"].as_u64().expect("order"))
        .collect()
}
