//! Command-line interface for taskdeck
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command group is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::board::Board;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::lock::FileLock;
use crate::output::OutputOptions;
use crate::storage::JsonFileStorage;

mod project;
mod subtask;
mod task;

/// taskdeck - projects, ordered tasks and subtasks
///
/// Keeps a personal task board in a single JSON file. Tasks and subtasks
/// keep a dense position within their list and completion rolls up from
/// subtasks to their task.
#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data file (defaults to storage.path from config, then the platform data dir)
    #[arg(long, global = true, env = "TASKDECK_DATA")]
    pub data: Option<PathBuf>,

    /// Config file (defaults to ./.taskdeck.toml)
    #[arg(long, global = true, env = "TASKDECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Tasks within a project
    #[command(subcommand)]
    Task(TaskCommands),

    /// Subtasks within a task
    #[command(subcommand)]
    Subtask(SubtaskCommands),
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects
    List {
        /// Most recently created first (overrides projects.list_order)
        #[arg(long)]
        newest_first: bool,
    },

    /// Show a project with its tasks and subtasks
    Show {
        /// Project ID
        id: String,
    },

    /// Create a project
    New {
        /// Project name
        name: String,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,

        /// Display color (defaults to projects.default_color)
        #[arg(long)]
        color: Option<String>,
    },

    /// Change a project's name, description or color
    Edit {
        /// Project ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a project with all of its tasks
    Rm {
        /// Project ID
        id: String,
    },

    /// Toggle every task in a project
    Toggle {
        /// Project ID
        id: String,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Append a task to a project
    Add {
        /// Project ID
        project: String,

        /// Task title
        title: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Toggle a task (cascades to its subtasks)
    Toggle {
        project: String,
        task: String,
    },

    /// Change a task's title or description
    Edit {
        project: String,
        task: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a task with its subtasks
    Rm {
        project: String,
        task: String,
    },

    /// Move a task to a new position (0-based)
    Reorder {
        project: String,
        task: String,
        new_order: usize,
    },
}

/// Subtask subcommands
#[derive(Subcommand, Debug)]
pub enum SubtaskCommands {
    /// Append a subtask to a task
    Add {
        project: String,
        task: String,

        /// Subtask title
        title: String,
    },

    /// Toggle a subtask and recompute its task
    Toggle {
        project: String,
        task: String,
        subtask: String,
    },

    /// Rename a subtask
    Edit {
        project: String,
        task: String,
        subtask: String,

        #[arg(long)]
        title: String,
    },

    /// Delete a subtask
    Rm {
        project: String,
        task: String,
        subtask: String,
    },

    /// Move a subtask to a new position within its task (0-based)
    Reorder {
        project: String,
        task: String,
        subtask: String,
        new_order: usize,
    },

    /// Move a subtask to another task of the same project
    Move {
        project: String,
        from_task: String,
        to_task: String,
        subtask: String,

        /// Position in the destination task (defaults to the end)
        #[arg(long)]
        position: Option<usize>,
    },
}

/// Global options shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub data: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

impl Context {
    pub fn output(&self) -> OutputOptions {
        OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }

    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load(path),
            None => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                Ok(Config::load_from_dir(&cwd))
            }
        }
    }

    fn storage(&self, config: &Config) -> JsonFileStorage {
        let path = self.data.clone().unwrap_or_else(|| config.data_path());
        JsonFileStorage::new(path).with_lock_timeout(config.storage.lock_timeout_ms)
    }

    /// Open the board for reading
    pub fn open_reader(&self) -> Result<Session> {
        let config = self.load_config()?;
        let storage = self.storage(&config);
        let data_path = storage.path().to_path_buf();
        let board = Board::open(storage)?;
        Ok(Session {
            board,
            config,
            data_path,
            _writer: None,
        })
    }

    /// Open the board holding the single-writer lock until the session drops
    pub fn open_writer(&self) -> Result<Session> {
        let config = self.load_config()?;
        let storage = self.storage(&config);
        let data_path = storage.path().to_path_buf();
        let writer = storage.acquire_writer()?;
        let board = Board::open(storage)?;
        Ok(Session {
            board,
            config,
            data_path,
            _writer: Some(writer),
        })
    }
}

/// An opened board plus the config it was opened with
pub struct Session {
    pub board: Board,
    pub config: Config,
    pub data_path: PathBuf,
    _writer: Option<FileLock>,
}

impl Session {
    /// Fail the command if any write-through did not reach the data file.
    ///
    /// The process exits right after, so a failed save would otherwise lose
    /// the change silently.
    pub fn finish(self) -> Result<()> {
        let failures = self.board.persist_failures();
        if failures > 0 {
            return Err(Error::Persistence(format!(
                "{failures} write(s) to {} failed",
                self.data_path.display()
            )));
        }
        Ok(())
    }
}

impl Cli {
    fn context(&self) -> Context {
        Context {
            data: self.data.clone(),
            config: self.config.clone(),
            json: self.json,
            quiet: self.quiet,
        }
    }

    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let ctx = self.context();
        match self.command {
            Commands::Project(cmd) => match cmd {
                ProjectCommands::List { newest_first } => {
                    project::run_list(project::ListOptions { newest_first, ctx })
                }
                ProjectCommands::Show { id } => project::run_show(project::ShowOptions { id, ctx }),
                ProjectCommands::New { name, description, color } => {
                    project::run_new(project::NewOptions {
                        name,
                        description,
                        color,
                        ctx,
                    })
                }
                ProjectCommands::Edit { id, name, description, color } => {
                    project::run_edit(project::EditOptions {
                        id,
                        name,
                        description,
                        color,
                        ctx,
                    })
                }
                ProjectCommands::Rm { id } => project::run_rm(project::RmOptions { id, ctx }),
                ProjectCommands::Toggle { id } => {
                    project::run_toggle(project::ToggleOptions { id, ctx })
                }
            },
            Commands::Task(cmd) => match cmd {
                TaskCommands::Add { project, title, description } => {
                    task::run_add(task::AddOptions {
                        project,
                        title,
                        description,
                        ctx,
                    })
                }
                TaskCommands::Toggle { project, task } => {
                    task::run_toggle(task::ToggleOptions { project, task, ctx })
                }
                TaskCommands::Edit { project, task, title, description } => {
                    task::run_edit(task::EditOptions {
                        project,
                        task,
                        title,
                        description,
                        ctx,
                    })
                }
                TaskCommands::Rm { project, task } => {
                    task::run_rm(task::RmOptions { project, task, ctx })
                }
                TaskCommands::Reorder { project, task, new_order } => {
                    task::run_reorder(task::ReorderOptions {
                        project,
                        task,
                        new_order,
                        ctx,
                    })
                }
            },
            Commands::Subtask(cmd) => match cmd {
                SubtaskCommands::Add { project, task, title } => {
                    subtask::run_add(subtask::AddOptions {
                        project,
                        task,
                        title,
                        ctx,
                    })
                }
                SubtaskCommands::Toggle { project, task, subtask } => {
                    subtask::run_toggle(subtask::TargetOptions {
                        project,
                        task,
                        subtask,
                        ctx,
                    })
                }
                SubtaskCommands::Edit { project, task, subtask, title } => {
                    subtask::run_edit(subtask::EditOptions {
                        project,
                        task,
                        subtask,
                        title,
                        ctx,
                    })
                }
                SubtaskCommands::Rm { project, task, subtask } => {
                    subtask::run_rm(subtask::TargetOptions {
                        project,
                        task,
                        subtask,
                        ctx,
                    })
                }
                SubtaskCommands::Reorder { project, task, subtask, new_order } => {
                    subtask::run_reorder(subtask::ReorderOptions {
                        project,
                        task,
                        subtask,
                        new_order,
                        ctx,
                    })
                }
                SubtaskCommands::Move { project, from_task, to_task, subtask, position } => {
                    subtask::run_move(subtask::MoveOptions {
                        project,
                        from_task,
                        to_task,
                        subtask,
                        position,
                        ctx,
                    })
                }
            },
        }
    }
}

/// `[x]` / `[ ]` marker for human output
fn check_mark(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subtask_move_with_position() {
        let cli = Cli::try_parse_from([
            "taskdeck", "--json", "subtask", "move", "p", "a", "b", "s", "--position", "0",
        ])
        .expect("parse");
        assert!(cli.json);
        match cli.command {
            Commands::Subtask(SubtaskCommands::Move { position, to_task, .. }) => {
                assert_eq!(position, Some(0));
                assert_eq!(to_task, "b");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_order() {
        let result = Cli::try_parse_from(["taskdeck", "task", "reorder", "p", "t", "-1"]);
        assert!(result.is_err());
    }
}
