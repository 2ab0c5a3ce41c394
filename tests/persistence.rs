use std::fs;

use taskdeck::error::Error;
use taskdeck::storage::{JsonFileStorage, Persistence};
use taskdeck::Board;
use tempfile::TempDir;

#[test]
fn board_state_survives_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("data").join("projects.json");

    let (project_id, task_id) = {
        let mut board = Board::open(JsonFileStorage::new(&path))?;
        let project = board
            .projects()
            .create("Home", Some("chores".to_string()), Some("#ff0".to_string()))?;
        let task = board.tasks().add(&project.id, "Kitchen", None)?;
        board.subtasks().add(&project.id, &task.id, "Dishes")?;
        board.subtasks().add(&project.id, &task.id, "Floor")?;
        (project.id, task.id)
    };

    let mut board = Board::open(JsonFileStorage::new(&path))?;
    let project = board.projects().get(&project_id)?;
    assert_eq!(project.name, "Home");
    assert_eq!(project.color, "#ff0");
    let task = board.tasks().get(&project_id, &task_id)?;
    assert_eq!(task.subtasks.len(), 2);
    assert_eq!(task.subtasks[1].title, "Floor");
    assert_eq!(task.subtasks[1].order, 1);
    Ok(())
}

#[test]
fn data_file_is_a_pretty_json_array() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("projects.json");
    let mut board = Board::open(JsonFileStorage::new(&path))?;
    board.projects().create("Home", None, None)?;

    let raw = fs::read_to_string(&path)?;
    assert!(raw.starts_with("[\n"));
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(value[0]["name"], "Home");
    assert!(value[0]["tasks"].as_array().is_some_and(|tasks| tasks.is_empty()));
    Ok(())
}

#[test]
fn legacy_file_is_renormalized_on_open() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("projects.json");
    let legacy = r##"[
  {
    "id": "p1",
    "name": "Legacy",
    "description": "",
    "color": "#000",
    "tasks": [
      { "id": "t2", "title": "second", "completed": false, "order": 7, "subtasks": [] },
      { "id": "t1", "title": "first", "completed": false, "order": 2,
        "subtasks": [
          { "id": "s1", "title": "x", "completed": true, "order": 5 },
          { "id": "s2", "title": "y", "completed": true, "order": 5 }
        ] }
    ]
  }
]"##;
    fs::write(&path, legacy)?;

    let mut board = Board::open(JsonFileStorage::new(&path))?;
    let tasks = board.tasks().list("p1")?;
    assert_eq!(tasks[0].id, "t1");
    assert_eq!(tasks[0].order, 0);
    assert_eq!(tasks[1].id, "t2");
    assert_eq!(tasks[1].order, 1);
    let orders: Vec<usize> = tasks[0].subtasks.iter().map(|s| s.order).collect();
    assert_eq!(orders, [0, 1]);
    assert_eq!(tasks[0].subtasks[0].id, "s1");

    // first mutation rewrites the file with dense orders
    board.tasks().reorder("p1", "t2", 0)?;
    let saved = JsonFileStorage::new(&path).load()?;
    assert_eq!(saved[0].tasks[0].id, "t2");
    assert_eq!(saved[0].tasks[1].subtasks[1].order, 1);
    Ok(())
}

#[test]
fn corrupt_file_fails_to_open() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("projects.json");
    fs::write(&path, "[{\"id\": ")?;

    let err = Board::open(JsonFileStorage::new(&path)).expect_err("corrupt");
    assert!(matches!(err, Error::Json(_)));
    Ok(())
}

#[test]
fn unwritable_location_keeps_memory_state() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    // a directory where the data file should be makes every save fail
    let path = dir.path().join("projects.json");
    fs::create_dir_all(&path)?;
    let storage = JsonFileStorage::new(&path).with_lock_timeout(200);

    let mut board = Board::open(MemoryBacked::empty(storage))?;
    let project = board.projects().create("Home", None, None)?;
    board.tasks().add(&project.id, "Still here", None)?;

    assert_eq!(board.persist_failures(), 2);
    assert_eq!(board.tasks().list(&project.id)?.len(), 1);
    assert!(board.flush().is_err());
    Ok(())
}

/// Starts empty regardless of what is on disk, then writes through to files
struct MemoryBacked {
    inner: JsonFileStorage,
}

impl MemoryBacked {
    fn empty(inner: JsonFileStorage) -> Self {
        Self { inner }
    }
}

impl Persistence for MemoryBacked {
    fn load(&self) -> taskdeck::Result<Vec<taskdeck::Project>> {
        Ok(Vec::new())
    }

    fn save(&self, projects: &[taskdeck::Project]) -> taskdeck::Result<()> {
        self.inner.save(projects)
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}
