//! taskdeck project command implementations

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{check_mark, Context};
use crate::error::{Error, Result};
use crate::model::{Project, ProjectPatch};
use crate::output::{emit_success, HumanOutput};
use crate::project::ListOrder;

/// Options for `taskdeck project list`
pub struct ListOptions {
    pub newest_first: bool,
    pub ctx: Context,
}

/// Options for `taskdeck project show`
pub struct ShowOptions {
    pub id: String,
    pub ctx: Context,
}

/// Options for `taskdeck project new`
pub struct NewOptions {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub ctx: Context,
}

/// Options for `taskdeck project edit`
pub struct EditOptions {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub ctx: Context,
}

/// Options for `taskdeck project rm`
pub struct RmOptions {
    pub id: String,
    pub ctx: Context,
}

/// Options for `taskdeck project toggle`
pub struct ToggleOptions {
    pub id: String,
    pub ctx: Context,
}

#[derive(Serialize)]
struct ProjectSummary {
    id: String,
    name: String,
    description: String,
    color: String,
    created_at: DateTime<Utc>,
    tasks: usize,
    completed_tasks: usize,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            color: project.color.clone(),
            created_at: project.created_at,
            tasks: project.tasks.len(),
            completed_tasks: project.tasks.iter().filter(|task| task.completed).count(),
        }
    }
}

#[derive(Serialize)]
struct ProjectListReport {
    total: usize,
    projects: Vec<ProjectSummary>,
}

#[derive(Serialize)]
struct ProjectRemovedReport {
    id: String,
    name: String,
    tasks_removed: usize,
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let mut session = options.ctx.open_reader()?;
    let order = if options.newest_first {
        ListOrder::NewestFirst
    } else {
        session.config.projects.list_order
    };
    let projects = session.board.projects().list(order);

    let report = ProjectListReport {
        total: projects.len(),
        projects: projects.iter().map(ProjectSummary::from).collect(),
    };

    let mut human = HumanOutput::new(format!("taskdeck project list: {} project(s)", report.total));
    for project in &report.projects {
        human.push_detail(format!(
            "{} {} ({}/{} done)",
            project.id, project.name, project.completed_tasks, project.tasks
        ));
    }
    if report.total == 0 {
        human.push_next_step("taskdeck project new <name>");
    }

    session.finish()?;
    emit_success(options.ctx.output(), "project list", &report, Some(&human))
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let mut session = options.ctx.open_reader()?;
    let project = session.board.projects().get(&options.id)?;

    let mut human = HumanOutput::new(format!("taskdeck project show: {}", project.name));
    human.push_summary("id", project.id.clone());
    if !project.description.is_empty() {
        human.push_summary("description", project.description.clone());
    }
    if !project.color.is_empty() {
        human.push_summary("color", project.color.clone());
    }
    human.push_summary("created", project.created_at.to_rfc3339());
    for task in &project.tasks {
        human.push_detail(format!(
            "{} {}. {} ({})",
            check_mark(task.completed),
            task.order,
            task.title,
            task.id
        ));
        for subtask in &task.subtasks {
            human.push_detail(format!(
                "    {} {}. {} ({})",
                check_mark(subtask.completed),
                subtask.order,
                subtask.title,
                subtask.id
            ));
        }
    }
    if project.tasks.is_empty() {
        human.push_next_step(format!("taskdeck task add {} <title>", project.id));
    }

    session.finish()?;
    emit_success(options.ctx.output(), "project show", &project, Some(&human))
}

pub fn run_new(options: NewOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let color = session.config.color_or_default(options.color);
    let project = session
        .board
        .projects()
        .create(&options.name, options.description, color)?;

    let mut human = HumanOutput::new(format!("taskdeck project new: {}", project.name));
    human.push_summary("id", project.id.clone());
    human.push_next_step(format!("taskdeck task add {} <title>", project.id));

    session.finish()?;
    emit_success(options.ctx.output(), "project new", &project, Some(&human))
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let patch = ProjectPatch {
        name: options.name,
        description: options.description,
        color: options.color,
    };
    if patch == ProjectPatch::default() {
        return Err(Error::InvalidArgument(
            "nothing to change: pass --name, --description or --color".to_string(),
        ));
    }

    let mut session = options.ctx.open_writer()?;
    let project = session.board.projects().update(&options.id, patch)?;

    let mut human = HumanOutput::new(format!("taskdeck project edit: {}", project.name));
    human.push_summary("id", project.id.clone());

    session.finish()?;
    emit_success(options.ctx.output(), "project edit", &project, Some(&human))
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let removed = session.board.projects().remove(&options.id)?;

    let report = ProjectRemovedReport {
        id: removed.id,
        name: removed.name,
        tasks_removed: removed.tasks.len(),
    };
    let mut human = HumanOutput::new(format!("taskdeck project rm: {}", report.name));
    human.push_summary("id", report.id.clone());
    human.push_summary("tasks removed", report.tasks_removed.to_string());

    session.finish()?;
    emit_success(options.ctx.output(), "project rm", &report, Some(&human))
}

pub fn run_toggle(options: ToggleOptions) -> Result<()> {
    let mut session = options.ctx.open_writer()?;
    let project = session.board.projects().toggle_all(&options.id)?;

    let mut human = HumanOutput::new(format!("taskdeck project toggle: {}", project.name));
    for task in &project.tasks {
        human.push_detail(format!("{} {}", check_mark(task.completed), task.title));
    }

    session.finish()?;
    emit_success(options.ctx.output(), "project toggle", &project, Some(&human))
}
