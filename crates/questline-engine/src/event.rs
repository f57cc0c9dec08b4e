/*
[INPUT]:  Engine lifecycle transitions
[OUTPUT]: Synchronous notifications for UI / journal / audio subscribers
[POS]:    Notification layer - task lifecycle events
[UPDATE]: When adding lifecycle notifications or event payload fields
*/

/// Lifecycle notification fired in-line by the engine.
///
/// Callbacks run synchronously during the operation that caused them, in
/// subscription order. Payloads are owned snapshots so subscribers can hold
/// on to them without borrowing engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    /// A task entered InProgress and its start actions ran.
    Started { task_id: String },
    /// An InProgress task received a progress report (including amount 0)
    /// or a blocked completion request.
    Updated {
        task_id: String,
        current_progress: i64,
        total_progress: i64,
    },
    /// A task transitioned to Completed.
    Completed { task_id: String },
}

impl TaskEvent {
    pub fn task_id(&self) -> &str {
        match self {
            TaskEvent::Started { task_id }
            | TaskEvent::Updated { task_id, .. }
            | TaskEvent::Completed { task_id } => task_id,
        }
    }
}
