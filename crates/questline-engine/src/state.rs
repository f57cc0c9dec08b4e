/*
[INPUT]:  Engine lifecycle transitions (start, advance, complete, reset)
[OUTPUT]: Per-node mutable runtime state, separate from catalog definitions
[POS]:    State layer - task lifecycle tracking
[UPDATE]: When task lifecycle states or progress semantics change
*/

use serde::{Deserialize, Serialize};

/// Lifecycle status of one task within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Failed,
}

impl TaskStatus {
    /// Terminal statuses never self-transition; only an explicit reset
    /// leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// Mutable per-task state, owned by the engine and keyed by task id.
///
/// The catalog node it shadows is immutable session data; this is the only
/// thing that changes as the player acts. Progress is deliberately unclamped:
/// negative reports and over-target accumulation are both representable, and
/// completion is gated solely by `current_progress >= total_progress` at the
/// engine level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRuntimeState {
    pub status: TaskStatus,
    pub current_progress: i64,
}

impl TaskRuntimeState {
    pub fn new() -> Self {
        Self {
            status: TaskStatus::NotStarted,
            current_progress: 0,
        }
    }

    /// Back to NotStarted with zero progress.
    pub fn reset(&mut self) {
        self.status = TaskStatus::NotStarted;
        self.current_progress = 0;
    }
}

impl Default for TaskRuntimeState {
    fn default() -> Self {
        Self::new()
    }
}
