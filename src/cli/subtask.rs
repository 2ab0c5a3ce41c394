//! taskdeck subtask command implementations

use super::{check_mark, Context};
use crate::error::Result;
use crate::model::{Subtask, SubtaskPatch};
use crate::output::{emit_success, HumanOutput};

/// Options for `taskdeck subtask add`
pub struct AddOptions {
    pub project: String,
    pub task: String,
    pub title: String,
    pub ctx: Context,
}

/// Options for `taskdeck subtask toggle` and `taskdeck subtask rm`
pub struct TargetOptions {
    pub project: String,
    pub task: String,
    pub subtask: String,
    pub ctx: Context,
}

/// Options for `taskdeck subtask edit`
pub struct EditOptions {
    pub project: String,
    pub task: String,
    pub subtask: String,
    pub title: String,
    pub ctx: Context,
}

/// Options for `taskdeck subtask reorder`
pub struct ReorderOptions {
    pub project: String,
    pub task: String,
    pub subtask: String,
    pub new_order: usize,
    pub ctx: Context,
}

/// Options for `taskdeck subtask move`
pub struct MoveOptions {
    pub project: String,
    pub from_task: String,
    pub to_task: String,
    pub subtask: String,
    pub position: Option<usize>,
    pub ctx: Context,
}

fn human_for(command: &str, subtask: &Subtask) -> HumanOutput {
    let mut human = HumanOutput::new(format!(
        "taskdeck {command}: {} {}",
        check_mark(subtask.completed),
        subtask.title
    ));
    human.push_summary("id", subtask.id.clone());
    human.push_summary("order", subtask.order.to_string());
    human
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let subtask = session
        .board
        .subtasks()
        .add(&options.project, &options.task, &options.title)?;

    let human = human_for("subtask add", &subtask);
    session.finish()?;
    emit_success(options.ctx.output(), "subtask add", &subtask, Some(&human))
}

pub fn run_toggle(options: TargetOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let subtask = session
        .board
        .subtasks()
        .toggle(&options.project, &options.task, &options.subtask)?;
    let task = session.board.tasks().get(&options.project, &options.task)?;

    let mut human = human_for("subtask toggle", &subtask);
    human.push_summary(
        "task",
        format!("{} {}", check_mark(task.completed), task.title),
    );

    session.finish()?;
    emit_success(options.ctx.output(), "subtask toggle", &subtask, Some(&human))
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let subtask = session.board.subtasks().update(
        &options.project,
        &options.task,
        &options.subtask,
        SubtaskPatch {
            title: Some(options.title),
        },
    )?;

    let human = human_for("subtask edit", &subtask);
    session.finish()?;
    emit_success(options.ctx.output(), "subtask edit", &subtask, Some(&human))
}

pub fn run_rm(options: TargetOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let removed = session
        .board
        .subtasks()
        .remove(&options.project, &options.task, &options.subtask)?;

    let human = human_for("subtask rm", &removed);
    session.finish()?;
    emit_success(options.ctx.output(), "subtask rm", &removed, Some(&human))
}

pub fn run_reorder(options: ReorderOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let subtask = session.board.subtasks().reorder(
        &options.project,
        &options.task,
        &options.subtask,
        options.new_order,
    )?;

    let mut human = human_for("subtask reorder", &subtask);
    if subtask.order != options.new_order {
        human.push_warning(format!(
            "position {} is past the end; placed at {}",
            options.new_order, subtask.order
        ));
    }

    session.finish()?;
    emit_success(options.ctx.output(), "subtask reorder", &subtask, Some(&human))
}

pub fn run_move(options: MoveOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let subtask = session.board.subtasks().move_to(
        &options.project,
        &options.from_task,
        &options.to_task,
        &options.subtask,
        options.position,
    )?;

    let mut human = human_for("subtask move", &subtask);
    human.push_summary("from", options.from_task.clone());
    human.push_summary("to", options.to_task.clone());

    session.finish()?;
    emit_success(options.ctx.output(), "subtask move", &subtask, Some(&human))
}
