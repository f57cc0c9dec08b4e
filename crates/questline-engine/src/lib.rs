/*
[INPUT]:  Public API exports for questline-engine crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod action;
pub mod catalog;
pub mod condition;
pub mod engine;
pub mod error;
pub mod event;
pub mod node;
pub mod state;
pub mod systems;
pub mod trigger;

// Re-export main types for convenience
pub use action::TaskAction;
pub use catalog::{CatalogFile, TaskCatalog};
pub use condition::TaskCondition;
pub use engine::TaskEngine;
pub use error::{CatalogError, EngineError};
pub use event::TaskEvent;
pub use node::{StatImpact, TaskBranch, TaskNode};
pub use state::{TaskRuntimeState, TaskStatus};
pub use systems::{NullSystems, TaskSystems};
pub use trigger::ProgressTrigger;
