/*
[INPUT]:  Error sources (catalog validation, YAML parsing, engine operations)
[OUTPUT]: Structured error types for catalog load and engine calls
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new validation rules or engine failure modes
*/

use thiserror::Error;

/// Errors detected while building or loading a task catalog.
///
/// All of these are load-time failures: a catalog that constructs
/// successfully never produces them again at run time.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two nodes share the same id
    #[error("duplicate task id: {task_id}")]
    DuplicateTaskId { task_id: String },

    /// A node was defined with an empty id
    #[error("task id must not be empty")]
    EmptyTaskId,

    /// Progress target below the minimum of 1
    #[error("task '{task_id}': total_progress must be >= 1, got {value}")]
    InvalidProgressTarget { task_id: String, value: i64 },

    /// A successor reference is present but syntactically empty
    #[error("task '{task_id}': successor id must not be empty")]
    EmptySuccessorId { task_id: String },

    /// Catalog document failed to parse
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Catalog file could not be read
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by engine operations.
///
/// Stale or out-of-order calls (advancing a task that is not in progress,
/// completing twice) are deliberately NOT errors; only structurally
/// unresolvable requests are. No engine state is mutated when one of these
/// is returned.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The requested task id is absent from the catalog
    #[error("unknown task id: {task_id}")]
    UnknownTask { task_id: String },
}
