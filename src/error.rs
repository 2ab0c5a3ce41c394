//! Error types for taskdeck
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (empty name/title, bad arguments, bad config)
//! - 3: Not found (project, task or subtask id does not resolve)
//! - 4: Operation failed (I/O, lock contention, persistence)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the taskdeck CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const NOT_FOUND: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskdeck operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Not found (exit code 3)
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Subtask not found: {0}")]
    SubtaskNotFound(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Duplicate {entity} id in data file: {id}")]
    DuplicateId { entity: &'static str, id: String },
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::EmptyField { .. } | Error::InvalidArgument(_) | Error::InvalidConfig(_) => {
                exit_codes::USER_ERROR
            }

            Error::ProjectNotFound(_) | Error::TaskNotFound(_) | Error::SubtaskNotFound(_) => {
                exit_codes::NOT_FOUND
            }

            Error::Io(_)
            | Error::Json(_)
            | Error::LockFailed(_)
            | Error::Persistence(_)
            | Error::DuplicateId { .. } => exit_codes::OPERATION_FAILED,
        }
    }

    /// True for the project/task/subtask not-found family
    pub fn is_not_found(&self) -> bool {
        self.exit_code() == exit_codes::NOT_FOUND
    }

    /// True when the request itself was rejected before any state changed
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::EmptyField { .. } | Error::InvalidArgument(_))
    }

    /// Structured details for machine-readable output
    pub fn details(&self) -> Option<serde_json::Value> {
        use serde_json::json;

        match self {
            Error::EmptyField { field } => Some(json!({ "field": field })),
            Error::ProjectNotFound(id) => Some(json!({ "entity": "project", "id": id })),
            Error::TaskNotFound(id) => Some(json!({ "entity": "task", "id": id })),
            Error::SubtaskNotFound(id) => Some(json!({ "entity": "subtask", "id": id })),
            Error::InvalidConfig(message) | Error::InvalidArgument(message) => {
                Some(json!({ "message": message }))
            }
            Error::DuplicateId { entity, id } => Some(json!({ "entity": entity, "id": id })),
            Error::LockFailed(path) => Some(json!({ "path": path.to_string_lossy() })),
            _ => None,
        }
    }
}

/// Result type alias for taskdeck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
