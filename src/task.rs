//! Task-level operations: tasks are ordered within their project.

use tracing::debug;

use crate::board::Board;
use crate::error::{Error, Result};
use crate::model::{self, Task, TaskPatch};
use crate::ordering;
use crate::rollup;

pub struct TaskStore<'a> {
    board: &'a mut Board,
}

impl<'a> TaskStore<'a> {
    pub(crate) fn new(board: &'a mut Board) -> Self {
        Self { board }
    }

    /// Tasks of a project in display order
    pub fn list(&self, project_id: &str) -> Result<Vec<Task>> {
        Ok(self.board.project(project_id)?.tasks.clone())
    }

    pub fn get(&self, project_id: &str, task_id: &str) -> Result<Task> {
        self.board.task(project_id, task_id).cloned()
    }

    /// Append a new incomplete task at the end of the project.
    pub fn add(
        &mut self,
        project_id: &str,
        title: &str,
        description: Option<String>,
    ) -> Result<Task> {
        let title = model::required("task title", title)?;
        let project = self.board.project_mut(project_id)?;

        let task = Task::new(title, description.unwrap_or_default());
        let order = ordering::insert_at(&mut project.tasks, task, None);
        let added = project.tasks[order].clone();
        debug!(project_id, task_id = %added.id, order, "task added");

        self.board.persist();
        Ok(added)
    }

    /// Flip completion and force every subtask to the new value.
    pub fn toggle(&mut self, project_id: &str, task_id: &str) -> Result<Task> {
        let task = self.board.task_mut(project_id, task_id)?;
        let completed = rollup::toggle_task(task);
        let toggled = task.clone();
        debug!(project_id, task_id, completed, "task toggled");

        self.board.persist();
        Ok(toggled)
    }

    /// Apply whitelisted field changes (title, description).
    pub fn update(&mut self, project_id: &str, task_id: &str, patch: TaskPatch) -> Result<Task> {
        patch.validate()?;
        let task = self.board.task_mut(project_id, task_id)?;
        patch.apply(task);
        let updated = task.clone();
        debug!(project_id, task_id, "task updated");

        self.board.persist();
        Ok(updated)
    }

    /// Delete a task and its subtasks; the remaining tasks close the gap.
    pub fn remove(&mut self, project_id: &str, task_id: &str) -> Result<Task> {
        let project = self.board.project_mut(project_id)?;
        let removed = ordering::remove_at(&mut project.tasks, task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
        debug!(project_id, task_id, remaining = project.tasks.len(), "task removed");

        self.board.persist();
        Ok(removed)
    }

    /// Move a task to `new_order` within its project.
    ///
    /// Orders past the end place the task last. Reordering onto the current
    /// position changes nothing but is still written through.
    pub fn reorder(&mut self, project_id: &str, task_id: &str, new_order: usize) -> Result<Task> {
        let project = self.board.project_mut(project_id)?;
        let order = ordering::move_within(&mut project.tasks, task_id, new_order)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
        let moved = project.tasks[order].clone();
        debug!(project_id, task_id, requested = new_order, order, "task reordered");

        self.board.persist();
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_tasks(titles: &[&str]) -> (Board, String, Vec<String>) {
        let mut board = Board::in_memory();
        let project = board.projects().create("P", None, None).expect("project");
        let ids = titles
            .iter()
            .map(|title| {
                board
                    .tasks()
                    .add(&project.id, title, None)
                    .expect("task")
                    .id
            })
            .collect();
        (board, project.id, ids)
    }

    fn titles(board: &mut Board, project_id: &str) -> Vec<String> {
        board
            .tasks()
            .list(project_id)
            .expect("list")
            .into_iter()
            .map(|task| task.title)
            .collect()
    }

    #[test]
    fn add_appends_with_next_order() {
        let (mut board, project_id, ids) = board_with_tasks(&["A", "B"]);
        let task = board.tasks().get(&project_id, &ids[1]).expect("get");
        assert_eq!(task.order, 1);
        assert!(!task.completed);
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn add_validates_before_lookup() {
        let mut board = Board::in_memory();
        let err = board.tasks().add("ghost", "", None).expect_err("empty");
        assert!(err.is_validation());
    }

    #[test]
    fn add_to_missing_project_is_not_found() {
        let mut board = Board::in_memory();
        let err = board.tasks().add("ghost", "T", None).expect_err("missing");
        assert!(matches!(err, Error::ProjectNotFound(_)));
    }

    #[test]
    fn reorder_moves_first_to_last() {
        let (mut board, project_id, ids) = board_with_tasks(&["A", "B", "C", "D"]);
        let moved = board.tasks().reorder(&project_id, &ids[0], 3).expect("reorder");
        assert_eq!(moved.order, 3);
        assert_eq!(titles(&mut board, &project_id), ["B", "C", "D", "A"]);
    }

    #[test]
    fn reorder_past_end_lands_last() {
        let (mut board, project_id, ids) = board_with_tasks(&["A", "B", "C"]);
        let moved = board.tasks().reorder(&project_id, &ids[0], 42).expect("reorder");
        assert_eq!(moved.order, 2);
        assert_eq!(titles(&mut board, &project_id), ["B", "C", "A"]);
    }

    #[test]
    fn reorder_missing_task_changes_nothing() {
        let (mut board, project_id, _) = board_with_tasks(&["A", "B"]);
        let err = board.tasks().reorder(&project_id, "ghost", 0).expect_err("missing");
        assert!(matches!(err, Error::TaskNotFound(_)));
        assert_eq!(titles(&mut board, &project_id), ["A", "B"]);
    }

    #[test]
    fn remove_middle_closes_gap() {
        let (mut board, project_id, ids) = board_with_tasks(&["A", "B", "C"]);
        board.tasks().remove(&project_id, &ids[1]).expect("remove");
        let tasks = board.tasks().list(&project_id).expect("list");
        let orders: Vec<usize> = tasks.iter().map(|task| task.order).collect();
        assert_eq!(orders, [0, 1]);
        assert_eq!(tasks[1].title, "C");
    }

    #[test]
    fn toggle_cascades_to_subtasks() {
        let (mut board, project_id, ids) = board_with_tasks(&["A"]);
        board.subtasks().add(&project_id, &ids[0], "s1").expect("s1");
        board.subtasks().add(&project_id, &ids[0], "s2").expect("s2");

        let task = board.tasks().toggle(&project_id, &ids[0]).expect("toggle");
        assert!(task.completed);
        assert!(task.subtasks.iter().all(|subtask| subtask.completed));
    }

    #[test]
    fn update_keeps_order_and_completion() {
        let (mut board, project_id, ids) = board_with_tasks(&["A", "B"]);
        board.tasks().toggle(&project_id, &ids[1]).expect("toggle");
        let task = board
            .tasks()
            .update(
                &project_id,
                &ids[1],
                TaskPatch {
                    title: Some(" Renamed ".to_string()),
                    description: None,
                },
            )
            .expect("update");
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.order, 1);
        assert!(task.completed);
    }
}
