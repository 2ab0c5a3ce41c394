//! The in-memory project collection and its write-through persistence.
//!
//! A [`Board`] is constructed once and handed to whatever drives it (the CLI,
//! a request handler, a test). Operations are grouped into three borrowed
//! views: [`Board::projects`], [`Board::tasks`] and [`Board::subtasks`].
//!
//! Every mutating operation saves the whole collection before returning. A
//! failed save is logged and counted but never rolls back the in-memory
//! change: memory stays the source of truth for the rest of the process.
//!
//! `Board` is `Send` but does no locking of its own. Share it behind a
//! `Mutex` if more than one thread needs to mutate it; the reindexing in
//! [`crate::ordering`] must not interleave on the same collection.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{Project, Task};
use crate::ordering;
use crate::project::ProjectStore;
use crate::storage::{MemoryStorage, Persistence};
use crate::subtask::SubtaskStore;
use crate::task::TaskStore;

pub struct Board {
    projects: Vec<Project>,
    persistence: Box<dyn Persistence>,
    persist_failures: usize,
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("projects", &self.projects.len())
            .field("persistence", &self.persistence.describe())
            .field("persist_failures", &self.persist_failures)
            .finish()
    }
}

impl Board {
    /// Load the collection from `persistence` and keep it as the write-through target.
    ///
    /// Loaded sibling collections are renormalized so that orders are dense
    /// from the first observation, even for hand-edited files. A collection
    /// with repeated ids is rejected.
    pub fn open(persistence: impl Persistence + 'static) -> Result<Self> {
        let mut projects = persistence.load()?;
        check_unique_ids(&projects)?;
        for project in &mut projects {
            normalize_project(project);
        }
        info!(
            location = %persistence.describe(),
            projects = projects.len(),
            "board opened"
        );
        Ok(Self {
            projects,
            persistence: Box::new(persistence),
            persist_failures: 0,
        })
    }

    /// Empty board backed by a private [`MemoryStorage`]
    pub fn in_memory() -> Self {
        Self {
            projects: Vec::new(),
            persistence: Box::new(MemoryStorage::new()),
            persist_failures: 0,
        }
    }

    pub fn projects(&mut self) -> ProjectStore<'_> {
        ProjectStore::new(self)
    }

    pub fn tasks(&mut self) -> TaskStore<'_> {
        TaskStore::new(self)
    }

    pub fn subtasks(&mut self) -> SubtaskStore<'_> {
        SubtaskStore::new(self)
    }

    /// Current state, in insertion order
    pub fn snapshot(&self) -> &[Project] {
        &self.projects
    }

    /// Number of write-throughs that failed since the board opened
    pub fn persist_failures(&self) -> usize {
        self.persist_failures
    }

    /// Save now and report the outcome to the caller
    pub fn flush(&mut self) -> Result<()> {
        self.persistence.save(&self.projects)
    }

    // =========================================================================
    // Lookups shared by the stores
    // =========================================================================

    pub(crate) fn project(&self, project_id: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|project| project.id == project_id)
            .ok_or_else(|| Error::ProjectNotFound(project_id.to_string()))
    }

    pub(crate) fn project_mut(&mut self, project_id: &str) -> Result<&mut Project> {
        self.projects
            .iter_mut()
            .find(|project| project.id == project_id)
            .ok_or_else(|| Error::ProjectNotFound(project_id.to_string()))
    }

    pub(crate) fn task(&self, project_id: &str, task_id: &str) -> Result<&Task> {
        self.project(project_id)?
            .task(task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))
    }

    pub(crate) fn task_mut(&mut self, project_id: &str, task_id: &str) -> Result<&mut Task> {
        self.project_mut(project_id)?
            .task_mut(task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))
    }

    pub(crate) fn collection_mut(&mut self) -> &mut Vec<Project> {
        &mut self.projects
    }

    /// Write the whole collection through to persistence.
    pub(crate) fn persist(&mut self) {
        match self.persistence.save(&self.projects) {
            Ok(()) => debug!(projects = self.projects.len(), "state persisted"),
            Err(err) => {
                self.persist_failures += 1;
                warn!(
                    error = %err,
                    location = %self.persistence.describe(),
                    failures = self.persist_failures,
                    "failed to persist projects; in-memory state kept"
                );
            }
        }
    }
}

/// Every project, task and subtask id must appear once across the board.
fn check_unique_ids(projects: &[Project]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut insert = |entity: &'static str, id: &str| {
        if seen.insert(id.to_string()) {
            Ok(())
        } else {
            Err(Error::DuplicateId {
                entity,
                id: id.to_string(),
            })
        }
    };

    for project in projects {
        insert("project", &project.id)?;
        for task in &project.tasks {
            insert("task", &task.id)?;
            for subtask in &task.subtasks {
                insert("subtask", &subtask.id)?;
            }
        }
    }
    Ok(())
}

fn normalize_project(project: &mut Project) {
    ordering::renormalize(&mut project.tasks);
    for task in &mut project.tasks {
        ordering::renormalize(&mut task.subtasks);
    }
}
