//! Persistence backends for the project collection
//!
//! The whole collection is loaded once when a [`Board`](crate::board::Board)
//! opens and rewritten wholesale after each mutation.
//!
//! # File layout
//!
//! ```text
//! <data dir>/
//!   projects.json                 # JSON array of projects (pretty-printed)
//!   projects.json.lock            # serializes writes
//!   projects.json.writer.lock     # held by a process for its whole session
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::model::Project;

/// Load/save primitives injected into a board
pub trait Persistence: Send {
    /// Load the full collection. A store that has never been written yields
    /// an empty collection.
    fn load(&self) -> Result<Vec<Project>>;

    /// Replace the persisted collection.
    fn save(&self, projects: &[Project]) -> Result<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// JSON file backend
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    lock_timeout_ms: u64,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    pub fn with_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.lock_timeout_ms = timeout_ms;
        self
    }

    /// Path to the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the single-writer lock for this data file.
    ///
    /// Hold the returned guard across load, mutate and save so that two
    /// processes never interleave their read-modify-write cycles.
    pub fn acquire_writer(&self) -> Result<FileLock> {
        FileLock::acquire(
            lock::lock_path_for(&self.path, "writer.lock"),
            self.lock_timeout_ms,
        )
    }
}

impl Persistence for JsonFileStorage {
    fn load(&self) -> Result<Vec<Project>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = lock::read_locked(&self.path, self.lock_timeout_ms)?;
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let projects = serde_json::from_slice(&content)?;
        Ok(projects)
    }

    fn save(&self, projects: &[Project]) -> Result<()> {
        let json = serde_json::to_string_pretty(projects)?;
        lock::write_atomic_locked(&self.path, json.as_bytes(), self.lock_timeout_ms)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory backend
///
/// Clones share the same snapshot, so a test can keep one handle and
/// observe what a board wrote through the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    projects: Vec<Project>,
    saves: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with an existing collection
    pub fn with_projects(projects: Vec<Project>) -> Self {
        let storage = Self::default();
        storage.state().projects = projects;
        storage
    }

    /// Last saved collection
    pub fn snapshot(&self) -> Vec<Project> {
        self.state().projects.clone()
    }

    /// Number of saves performed
    pub fn saves(&self) -> usize {
        self.state().saves
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Persistence for MemoryStorage {
    fn load(&self) -> Result<Vec<Project>> {
        Ok(self.snapshot())
    }

    fn save(&self, projects: &[Project]) -> Result<()> {
        let mut state = self.state();
        state.projects = projects.to_vec();
        state.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
