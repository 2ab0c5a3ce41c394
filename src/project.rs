//! Project-level operations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::error::{Error, Result};
use crate::model::{self, Project, ProjectPatch};
use crate::rollup;

/// Ordering for [`ProjectStore::list`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
    /// Insertion order
    #[default]
    Created,
    /// Most recently created first
    NewestFirst,
}

pub struct ProjectStore<'a> {
    board: &'a mut Board,
}

impl<'a> ProjectStore<'a> {
    pub(crate) fn new(board: &'a mut Board) -> Self {
        Self { board }
    }

    pub fn list(&self, order: ListOrder) -> Vec<Project> {
        let mut projects = self.board.snapshot().to_vec();
        if order == ListOrder::NewestFirst {
            // stable: projects created in the same instant keep insertion order
            projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        projects
    }

    pub fn get(&self, project_id: &str) -> Result<Project> {
        self.board.project(project_id).cloned()
    }

    /// Create an empty project. Missing description/color become empty strings.
    pub fn create(
        &mut self,
        name: &str,
        description: Option<String>,
        color: Option<String>,
    ) -> Result<Project> {
        let name = model::required("project name", name)?;
        let project = Project::new(
            name,
            description.unwrap_or_default(),
            color.unwrap_or_default(),
        );
        debug!(project_id = %project.id, name = %project.name, "project created");
        self.board.collection_mut().push(project.clone());
        self.board.persist();
        Ok(project)
    }

    /// Apply whitelisted field changes (name, description, color).
    pub fn update(&mut self, project_id: &str, patch: ProjectPatch) -> Result<Project> {
        patch.validate()?;
        let project = self.board.project_mut(project_id)?;
        patch.apply(project);
        let updated = project.clone();
        debug!(project_id, "project updated");
        self.board.persist();
        Ok(updated)
    }

    /// Delete a project together with all of its tasks and subtasks.
    pub fn remove(&mut self, project_id: &str) -> Result<Project> {
        let projects = self.board.collection_mut();
        let index = projects
            .iter()
            .position(|project| project.id == project_id)
            .ok_or_else(|| Error::ProjectNotFound(project_id.to_string()))?;
        let removed = projects.remove(index);
        debug!(project_id, tasks = removed.tasks.len(), "project removed");
        self.board.persist();
        Ok(removed)
    }

    /// Toggle every task in the project, cascading to subtasks.
    pub fn toggle_all(&mut self, project_id: &str) -> Result<Project> {
        let project = self.board.project_mut(project_id)?;
        rollup::toggle_project_all(project);
        let toggled = project.clone();
        debug!(project_id, tasks = toggled.tasks.len(), "project toggled");
        self.board.persist();
        Ok(toggled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn create_fills_defaults() {
        let mut board = Board::in_memory();
        let project = board.projects().create("P", None, None).expect("create");
        assert_eq!(project.name, "P");
        assert_eq!(project.description, "");
        assert_eq!(project.color, "");
        assert!(project.tasks.is_empty());
    }

    #[test]
    fn create_rejects_empty_name_without_mutation() {
        let mut board = Board::in_memory();
        let err = board.projects().create("  ", None, None).expect_err("empty");
        assert!(matches!(err, Error::EmptyField { field: "project name" }));
        assert!(board.snapshot().is_empty());
    }

    #[test]
    fn list_newest_first() {
        let mut board = Board::in_memory();
        let first = board.projects().create("old", None, None).expect("create");
        let second = board.projects().create("new", None, None).expect("create");
        board.collection_mut()[0].created_at = second.created_at - Duration::seconds(5);

        let listed = board.projects().list(ListOrder::NewestFirst);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);

        let listed = board.projects().list(ListOrder::Created);
        assert_eq!(listed[0].id, first.id);
    }

    #[test]
    fn update_merges_only_given_fields() {
        let mut board = Board::in_memory();
        let project = board
            .projects()
            .create("P", Some("desc".to_string()), Some("red".to_string()))
            .expect("create");
        let updated = board
            .projects()
            .update(
                &project.id,
                ProjectPatch {
                    color: Some("blue".to_string()),
                    ..ProjectPatch::default()
                },
            )
            .expect("update");
        assert_eq!(updated.name, "P");
        assert_eq!(updated.description, "desc");
        assert_eq!(updated.color, "blue");
        assert_eq!(updated.id, project.id);
    }

    #[test]
    fn remove_missing_project_is_not_found() {
        let mut board = Board::in_memory();
        board.projects().create("keep", None, None).expect("create");
        let err = board.projects().remove("ghost").expect_err("missing");
        assert!(err.is_not_found());
        assert_eq!(board.snapshot().len(), 1);
    }

    #[test]
    fn list_order_parses_from_config_strings() {
        let order: ListOrder = serde_json::from_str("\"newest_first\"").expect("parse");
        assert_eq!(order, ListOrder::NewestFirst);
    }
}
