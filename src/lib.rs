//! taskdeck - personal task board library
//!
//! Projects own ordered tasks, tasks own ordered subtasks. The library keeps
//! every sibling collection densely ordered (`0..n-1`) across inserts,
//! removals, reorders and cross-task moves, and keeps task completion
//! consistent with its subtasks.
//!
//! # Core Concepts
//!
//! - **Board**: the in-memory collection plus an injected persistence backend,
//!   written through after every mutation
//! - **Stores**: project, task and subtask operations borrowed from a board
//! - **Ordering**: shift-then-renormalize reindexing of sibling collections
//! - **Roll-up**: task toggles cascade down, subtask changes re-derive the task
//!
//! # Module Organization
//!
//! - `board`: the board and its write-through persistence
//! - `project`, `task`, `subtask`: store operations
//! - `model`: entities, ids and whitelisted patches
//! - `ordering`: dense reindexing primitives
//! - `rollup`: completion propagation
//! - `storage`: JSON file and in-memory persistence backends
//! - `lock`: file locking and atomic writes
//! - `config`: configuration loading from `.taskdeck.toml`
//! - `error`: error types and result aliases
//! - `output`: CLI output envelope
//! - `cli`: command-line interface using clap
//!
//! ```
//! use taskdeck::board::Board;
//!
//! let mut board = Board::in_memory();
//! let project = board.projects().create("Home", None, None)?;
//! let task = board.tasks().add(&project.id, "Clean kitchen", None)?;
//! board.subtasks().add(&project.id, &task.id, "Dishes")?;
//! let task = board.tasks().toggle(&project.id, &task.id)?;
//! assert!(task.subtasks.iter().all(|subtask| subtask.completed));
//! # Ok::<(), taskdeck::Error>(())
//! ```

pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod lock;
pub mod model;
pub mod ordering;
pub mod output;
pub mod project;
pub mod rollup;
pub mod storage;
pub mod subtask;
pub mod task;

pub use board::Board;
pub use error::{Error, Result};
pub use model::{Project, ProjectPatch, Subtask, SubtaskPatch, Task, TaskPatch};
pub use project::ListOrder;
