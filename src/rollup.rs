//! Completion roll-up between a task and its subtasks.
//!
//! Two directions:
//! - downward: toggling a task is a manual override that forces every
//!   subtask to the task's new value
//! - upward: a task with subtasks is completed exactly when it has at least
//!   one subtask and all of them are completed

use crate::model::{Project, Subtask, Task};

/// Derived completion for a subtask collection. Empty is never complete.
pub fn all_completed(subtasks: &[Subtask]) -> bool {
    !subtasks.is_empty() && subtasks.iter().all(|subtask| subtask.completed)
}

/// Flip the task and cascade the new value to every subtask.
pub fn toggle_task(task: &mut Task) -> bool {
    task.completed = !task.completed;
    for subtask in &mut task.subtasks {
        subtask.completed = task.completed;
    }
    task.completed
}

/// Flip one subtask, then recompute the owning task from its subtasks.
///
/// Returns `None` without touching anything when the subtask is absent.
pub fn toggle_subtask(task: &mut Task, subtask_id: &str) -> Option<bool> {
    let subtask = task.subtask_mut(subtask_id)?;
    subtask.completed = !subtask.completed;
    let completed = subtask.completed;
    reevaluate(task);
    Some(completed)
}

/// Apply [`toggle_task`] to every task; each task flips its own state.
pub fn toggle_project_all(project: &mut Project) {
    for task in &mut project.tasks {
        toggle_task(task);
    }
}

/// Recompute completion after a structural change to the subtask list.
///
/// Used after add, remove and cross-task moves: an empty list leaves the
/// task incomplete, otherwise it tracks [`all_completed`].
pub fn reevaluate(task: &mut Task) {
    task.completed = all_completed(&task.subtasks);
}
