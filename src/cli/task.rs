//! taskdeck task command implementations

use serde::Serialize;

use super::{check_mark, Context};
use crate::error::{Error, Result};
use crate::model::{Task, TaskPatch};
use crate::output::{emit_success, HumanOutput};

/// Options for `taskdeck task add`
pub struct AddOptions {
    pub project: String,
    pub title: String,
    pub description: Option<String>,
    pub ctx: Context,
}

/// Options for `taskdeck task toggle`
pub struct ToggleOptions {
    pub project: String,
    pub task: String,
    pub ctx: Context,
}

/// Options for `taskdeck task edit`
pub struct EditOptions {
    pub project: String,
    pub task: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub ctx: Context,
}

/// Options for `taskdeck task rm`
pub struct RmOptions {
    pub project: String,
    pub task: String,
    pub ctx: Context,
}

/// Options for `taskdeck task reorder`
pub struct ReorderOptions {
    pub project: String,
    pub task: String,
    pub new_order: usize,
    pub ctx: Context,
}

#[derive(Serialize)]
struct TaskRemovedReport {
    project_id: String,
    id: String,
    title: String,
    subtasks_removed: usize,
}

fn describe(human: &mut HumanOutput, task: &Task) {
    human.push_summary("id", task.id.clone());
    human.push_summary("order", task.order.to_string());
    human.push_summary("completed", task.completed.to_string());
    for subtask in &task.subtasks {
        human.push_detail(format!("{} {}", check_mark(subtask.completed), subtask.title));
    }
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let task = session
        .board
        .tasks()
        .add(&options.project, &options.title, options.description)?;

    let mut human = HumanOutput::new(format!("taskdeck task add: {}", task.title));
    describe(&mut human, &task);
    human.push_next_step(format!(
        "taskdeck subtask add {} {} <title>",
        options.project, task.id
    ));

    session.finish()?;
    emit_success(options.ctx.output(), "task add", &task, Some(&human))
}

pub fn run_toggle(options: ToggleOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let task = session.board.tasks().toggle(&options.project, &options.task)?;

    let mut human = HumanOutput::new(format!(
        "taskdeck task toggle: {} {}",
        check_mark(task.completed),
        task.title
    ));
    describe(&mut human, &task);

    session.finish()?;
    emit_success(options.ctx.output(), "task toggle", &task, Some(&human))
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let patch = TaskPatch {
        title: options.title,
        description: options.description,
    };
    if patch == TaskPatch::default() {
        return Err(Error::InvalidArgument(
            "nothing to change: pass --title or --description".to_string(),
        ));
    }

    let mut session = options.ctx.open_writer()?;
    let task = session
        .board
        .tasks()
        .update(&options.project, &options.task, patch)?;

    let mut human = HumanOutput::new(format!("taskdeck task edit: {}", task.title));
    describe(&mut human, &task);

    session.finish()?;
    emit_success(options.ctx.output(), "task edit", &task, Some(&human))
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let removed = session.board.tasks().remove(&options.project, &options.task)?;

    let report = TaskRemovedReport {
        project_id: options.project,
        id: removed.id,
        title: removed.title,
        subtasks_removed: removed.subtasks.len(),
    };
    let mut human = HumanOutput::new(format!("taskdeck task rm: {}", report.title));
    human.push_summary("id", report.id.clone());
    human.push_summary("subtasks removed", report.subtasks_removed.to_string());

    session.finish()?;
    emit_success(options.ctx.output(), "task rm", &report, Some(&human))
}

pub fn run_reorder(options: ReorderOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let task = session
        .board
        .tasks()
        .reorder(&options.project, &options.task, options.new_order)?;

    let mut human = HumanOutput::new(format!("taskdeck task reorder: {}", task.title));
    describe(&mut human, &task);
    if task.order != options.new_order {
        human.push_warning(format!(
            "position {} is past the end; placed at {}",
            options.new_order, task.order
        ));
    }

    session.finish()?;
    emit_success(options.ctx.output(), "task reorder", &task, Some(&human))
}
