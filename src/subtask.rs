//! Subtask-level operations, including moves between tasks of one project.
//!
//! Every structural change to a task's subtask list (add, remove, move)
//! re-derives that task's completion from its subtasks afterwards. A toggle
//! does the same through [`rollup::toggle_subtask`]. Reordering within a
//! list leaves completion alone because the set of subtasks is unchanged.

use tracing::debug;

use crate::board::Board;
use crate::error::{Error, Result};
use crate::model::{self, Subtask, SubtaskPatch, Task};
use crate::ordering;
use crate::rollup;

pub struct SubtaskStore<'a> {
    board: &'a mut Board,
}

impl<'a> SubtaskStore<'a> {
    pub(crate) fn new(board: &'a mut Board) -> Self {
        Self { board }
    }

    pub fn list(&self, project_id: &str, task_id: &str) -> Result<Vec<Subtask>> {
        Ok(self.board.task(project_id, task_id)?.subtasks.clone())
    }

    pub fn get(&self, project_id: &str, task_id: &str, subtask_id: &str) -> Result<Subtask> {
        self.board
            .task(project_id, task_id)?
            .subtask(subtask_id)
            .cloned()
            .ok_or_else(|| Error::SubtaskNotFound(subtask_id.to_string()))
    }

    /// Append an incomplete subtask. The owning task becomes incomplete.
    pub fn add(&mut self, project_id: &str, task_id: &str, title: &str) -> Result<Subtask> {
        let title = model::required("subtask title", title)?;
        let task = self.board.task_mut(project_id, task_id)?;

        let order = ordering::insert_at(&mut task.subtasks, Subtask::new(title), None);
        rollup::reevaluate(task);
        let added = task.subtasks[order].clone();
        debug!(project_id, task_id, subtask_id = %added.id, order, "subtask added");

        self.board.persist();
        Ok(added)
    }

    /// Flip one subtask and recompute the owning task.
    pub fn toggle(&mut self, project_id: &str, task_id: &str, subtask_id: &str) -> Result<Subtask> {
        let task = self.board.task_mut(project_id, task_id)?;
        let completed = rollup::toggle_subtask(task, subtask_id)
            .ok_or_else(|| Error::SubtaskNotFound(subtask_id.to_string()))?;
        let toggled = subtask_in(task, subtask_id)?;
        debug!(
            project_id,
            task_id,
            subtask_id,
            completed,
            task_completed = task.completed,
            "subtask toggled"
        );

        self.board.persist();
        Ok(toggled)
    }

    pub fn update(
        &mut self,
        project_id: &str,
        task_id: &str,
        subtask_id: &str,
        patch: SubtaskPatch,
    ) -> Result<Subtask> {
        patch.validate()?;
        let subtask = self
            .board
            .task_mut(project_id, task_id)?
            .subtask_mut(subtask_id)
            .ok_or_else(|| Error::SubtaskNotFound(subtask_id.to_string()))?;
        patch.apply(subtask);
        let updated = subtask.clone();
        debug!(project_id, task_id, subtask_id, "subtask updated");

        self.board.persist();
        Ok(updated)
    }

    /// Delete a subtask and recompute the owning task.
    pub fn remove(&mut self, project_id: &str, task_id: &str, subtask_id: &str) -> Result<Subtask> {
        let task = self.board.task_mut(project_id, task_id)?;
        let removed = ordering::remove_at(&mut task.subtasks, subtask_id)
            .ok_or_else(|| Error::SubtaskNotFound(subtask_id.to_string()))?;
        rollup::reevaluate(task);
        debug!(
            project_id,
            task_id,
            subtask_id,
            remaining = task.subtasks.len(),
            task_completed = task.completed,
            "subtask removed"
        );

        self.board.persist();
        Ok(removed)
    }

    /// Move a subtask to `new_order` within its task; past the end lands last.
    pub fn reorder(
        &mut self,
        project_id: &str,
        task_id: &str,
        subtask_id: &str,
        new_order: usize,
    ) -> Result<Subtask> {
        let task = self.board.task_mut(project_id, task_id)?;
        let order = ordering::move_within(&mut task.subtasks, subtask_id, new_order)
            .ok_or_else(|| Error::SubtaskNotFound(subtask_id.to_string()))?;
        let moved = task.subtasks[order].clone();
        debug!(project_id, task_id, subtask_id, requested = new_order, order, "subtask reordered");

        self.board.persist();
        Ok(moved)
    }

    /// Transfer a subtask from one task to another within the same project.
    ///
    /// The subtask is inserted at `position` in the destination (clamped to
    /// its length) or appended when `None`. Both tasks have their completion
    /// re-derived. When source and destination are the same task the
    /// subtask is taken out and reinserted at `position`, which amounts to a
    /// reorder that defaults to the end.
    pub fn move_to(
        &mut self,
        project_id: &str,
        from_task_id: &str,
        to_task_id: &str,
        subtask_id: &str,
        position: Option<usize>,
    ) -> Result<Subtask> {
        let project = self.board.project_mut(project_id)?;
        let from = task_index(&project.tasks, from_task_id)?;
        let to = task_index(&project.tasks, to_task_id)?;
        if project.tasks[from].subtask(subtask_id).is_none() {
            return Err(Error::SubtaskNotFound(subtask_id.to_string()));
        }

        let (dest, order) = if from == to {
            let task = &mut project.tasks[from];
            let moved = ordering::remove_at(&mut task.subtasks, subtask_id)
                .ok_or_else(|| Error::SubtaskNotFound(subtask_id.to_string()))?;
            let order = ordering::insert_at(&mut task.subtasks, moved, position);
            (&*task, order)
        } else {
            let (source, dest) = pair_mut(&mut project.tasks, from, to);
            let order =
                ordering::move_across(&mut source.subtasks, &mut dest.subtasks, subtask_id, position)
                    .ok_or_else(|| Error::SubtaskNotFound(subtask_id.to_string()))?;
            rollup::reevaluate(source);
            rollup::reevaluate(dest);
            (&*dest, order)
        };
        let moved = dest.subtasks[order].clone();
        debug!(
            project_id,
            from_task_id,
            to_task_id,
            subtask_id,
            order,
            "subtask moved"
        );

        self.board.persist();
        Ok(moved)
    }
}

fn subtask_in(task: &Task, subtask_id: &str) -> Result<Subtask> {
    task.subtask(subtask_id)
        .cloned()
        .ok_or_else(|| Error::SubtaskNotFound(subtask_id.to_string()))
}

fn task_index(tasks: &[Task], task_id: &str) -> Result<usize> {
    ordering::position_of(tasks, task_id).ok_or_else(|| Error::TaskNotFound(task_id.to_string()))
}

/// Mutable access to two distinct elements. `a` and `b` must differ.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
