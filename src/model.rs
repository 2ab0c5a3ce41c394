//! Entities: projects own ordered tasks, tasks own ordered subtasks.
//!
//! Ids are random v4 UUIDs rendered as strings. They carry no ordering or
//! parsing semantics; callers must treat them as opaque.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::ordering::Ordered;

/// Generate a fresh opaque identifier
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub order: usize,
}

impl Project {
    pub fn new(name: String, description: String, color: String) -> Self {
        Self {
            id: new_id(),
            name,
            description,
            color,
            created_at: Utc::now(),
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }
}

impl Task {
    /// New incomplete task; the caller assigns `order` on insertion.
    pub fn new(title: String, description: String) -> Self {
        Self {
            id: new_id(),
            title,
            description,
            completed: false,
            order: 0,
            subtasks: Vec::new(),
        }
    }

    pub fn subtask(&self, subtask_id: &str) -> Option<&Subtask> {
        self.subtasks.iter().find(|subtask| subtask.id == subtask_id)
    }

    pub fn subtask_mut(&mut self, subtask_id: &str) -> Option<&mut Subtask> {
        self.subtasks
            .iter_mut()
            .find(|subtask| subtask.id == subtask_id)
    }
}

impl Subtask {
    pub fn new(title: String) -> Self {
        Self {
            id: new_id(),
            title,
            completed: false,
            order: 0,
        }
    }
}

impl Ordered for Task {
    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

impl Ordered for Subtask {
    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

// =========================================================================
// Patches
//
// Updates go through an explicit whitelist of mutable fields. Ids, `order`
// and child collections are not representable here, so an update can never
// corrupt them; order changes only happen through the reorder operations.
// =========================================================================

/// Mutable project fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Mutable task fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Mutable subtask fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ProjectPatch {
    /// Reject the patch before anything is applied
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            required("project name", name)?;
        }
        Ok(())
    }

    /// Apply a validated patch
    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(color) = self.color {
            project.color = color;
        }
    }
}

impl TaskPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            required("task title", title)?;
        }
        Ok(())
    }

    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            task.description = description;
        }
    }
}

impl SubtaskPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            required("subtask title", title)?;
        }
        Ok(())
    }

    pub fn apply(self, subtask: &mut Subtask) {
        if let Some(title) = self.title {
            subtask.title = title.trim().to_string();
        }
    }
}

/// Trim a required text field, rejecting empty or whitespace-only input
pub fn required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyField { field });
    }
    Ok(trimmed.to_string())
}
