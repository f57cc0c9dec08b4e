/*
[INPUT]:  Progress reports and completion requests from external stimuli
[OUTPUT]: Task lifecycle transitions, side effects, and notifications
[POS]:    Orchestration layer - the task graph state machine
[UPDATE]: When changing transition rules, branch resolution, or chaining
*/

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::catalog::TaskCatalog;
use crate::error::EngineError;
use crate::event::TaskEvent;
use crate::node::{TaskBranch, TaskNode};
use crate::state::{TaskRuntimeState, TaskStatus};
use crate::systems::{NullSystems, TaskSystems};

/// Upper bound on synchronous complete-then-start chaining within one
/// external call, so a mis-authored cyclic graph whose gates are all open
/// cannot recurse without bound.
const MAX_CHAIN_DEPTH: usize = 32;

/// The task graph state machine.
///
/// Owns the immutable catalog, one [`TaskRuntimeState`] per node, the single
/// active-task slot, the [`TaskSystems`] seam, and the subscriber list.
/// Purely reactive: nothing happens between calls, and every operation runs
/// to completion (including the whole successor chain) before returning.
///
/// Single-threaded by design. An embedder sharing one engine across threads
/// must serialize every entry point behind one mutex; there are no interior
/// locks.
pub struct TaskEngine {
    catalog: TaskCatalog,
    states: HashMap<String, TaskRuntimeState>,
    active: Option<String>,
    systems: Box<dyn TaskSystems>,
    subscribers: Vec<Box<dyn FnMut(&TaskEvent)>>,
}

impl TaskEngine {
    /// Engine over `catalog` with no game subsystems attached.
    pub fn new(catalog: TaskCatalog) -> Self {
        Self::with_systems(catalog, NullSystems)
    }

    /// Engine over `catalog` wired to concrete game subsystems.
    pub fn with_systems(catalog: TaskCatalog, systems: impl TaskSystems + 'static) -> Self {
        let states = catalog
            .task_ids()
            .map(|id| (id.to_string(), TaskRuntimeState::new()))
            .collect();
        Self {
            catalog,
            states,
            active: None,
            systems: Box::new(systems),
            subscribers: Vec::new(),
        }
    }

    /// Register a synchronous lifecycle subscriber. Callbacks fire in-line,
    /// in subscription order, during the operation that caused the event.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&TaskEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    /// Id of the task currently receiving progress, if any.
    pub fn active_task(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn task_state(&self, task_id: &str) -> Option<&TaskRuntimeState> {
        self.states.get(task_id)
    }

    /// Whether the progress counter alone has reached the target. Independent
    /// of condition satisfaction; the two gates are enforced separately.
    pub fn progress_complete(&self, task_id: &str) -> Option<bool> {
        let node = self.catalog.get(task_id)?;
        let state = self.states.get(task_id)?;
        Some(state.current_progress >= node.total_progress)
    }

    /// Start a task: InProgress with zero progress, active slot taken over
    /// (the previous active task keeps whatever state it had), start actions
    /// run in order, `Started` emitted.
    pub fn start_task(&mut self, task_id: &str) -> Result<(), EngineError> {
        let node = self.resolve(task_id)?;
        self.start_resolved(node, 0);
        Ok(())
    }

    /// Report progress against a task. Any amount is legal, zero and
    /// negative included, and the counter is never clamped. A report against
    /// a task that is not InProgress is a stale stimulus and is dropped
    /// without error or notification. When the counter reaches the target
    /// and every condition holds, completion runs immediately on the
    /// default-successor path.
    pub fn advance_progress(&mut self, task_id: &str, amount: i64) -> Result<(), EngineError> {
        let node = self.resolve(task_id)?;

        let current = {
            let Some(state) = self.states.get_mut(task_id) else {
                return Err(EngineError::UnknownTask {
                    task_id: task_id.to_string(),
                });
            };
            if state.status != TaskStatus::InProgress {
                debug!(task_id, status = ?state.status, "stale progress report ignored");
                return Ok(());
            }
            state.current_progress = state.current_progress.saturating_add(amount);
            state.current_progress
        };

        self.emit(TaskEvent::Updated {
            task_id: node.id.clone(),
            current_progress: current,
            total_progress: node.total_progress,
        });

        if current >= node.total_progress && node.conditions_met(self.systems.as_ref()) {
            self.complete_resolved(node, None, 0);
        }
        Ok(())
    }

    /// Try to complete the active task right now, ignoring its progress
    /// counter. Succeeds only when every condition holds; otherwise the task
    /// stays InProgress and a single `Updated` signals "still blocked".
    /// Returns whether completion happened. No active InProgress task is a
    /// no-op returning false.
    pub fn request_completion(&mut self) -> bool {
        let Some(task_id) = self.active.clone() else {
            debug!("completion requested with no active task");
            return false;
        };
        let Some(node) = self.catalog.get(&task_id).cloned() else {
            return false;
        };
        let in_progress = self
            .states
            .get(&task_id)
            .is_some_and(|s| s.status == TaskStatus::InProgress);
        if !in_progress {
            return false;
        }

        if node.conditions_met(self.systems.as_ref()) {
            self.complete_resolved(node, None, 0);
            return true;
        }

        info!(task_id = %node.id, "completion blocked by unmet conditions");
        let progress = self
            .states
            .get(&task_id)
            .map(|s| s.current_progress)
            .unwrap_or(0);
        self.emit(TaskEvent::Updated {
            task_id,
            current_progress: progress,
            total_progress: node.total_progress,
        });
        false
    }

    /// Complete a task explicitly, optionally selecting a branch by index.
    ///
    /// Only an InProgress task transitions; anything else is a stale call and
    /// a benign no-op. An out-of-range index (and `None`) falls through to
    /// the default successor, so callers may always omit the choice.
    pub fn complete_task(
        &mut self,
        task_id: &str,
        branch: Option<usize>,
    ) -> Result<(), EngineError> {
        let node = self.resolve(task_id)?;
        self.complete_resolved(node, branch, 0);
        Ok(())
    }

    /// Put a task back to NotStarted with zero progress. Resetting the
    /// active task also vacates the active slot.
    pub fn reset_task(&mut self, task_id: &str) -> Result<(), EngineError> {
        let Some(state) = self.states.get_mut(task_id) else {
            return Err(EngineError::UnknownTask {
                task_id: task_id.to_string(),
            });
        };
        state.reset();
        if self.active.as_deref() == Some(task_id) {
            self.active = None;
        }
        Ok(())
    }

    /// Reset every task and vacate the active slot.
    pub fn reset_all(&mut self) {
        for state in self.states.values_mut() {
            state.reset();
        }
        self.active = None;
    }

    fn resolve(&self, task_id: &str) -> Result<Arc<TaskNode>, EngineError> {
        self.catalog
            .get(task_id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownTask {
                task_id: task_id.to_string(),
            })
    }

    fn start_resolved(&mut self, node: Arc<TaskNode>, depth: usize) {
        if let Some(state) = self.states.get_mut(&node.id) {
            state.status = TaskStatus::InProgress;
            state.current_progress = 0;
        }
        self.active = Some(node.id.clone());
        info!(task_id = %node.id, name = %node.name, "task started");

        for action in &node.on_start {
            action.execute(self.systems.as_mut());
        }
        self.emit(TaskEvent::Started {
            task_id: node.id.clone(),
        });

        // A freshly started task whose gate is already open chains straight
        // into completion; the catalog's total_progress >= 1 rule means this
        // only happens at zero progress targets, which validation rejects.
        if node.total_progress <= 0 && node.conditions_met(self.systems.as_ref()) {
            self.complete_resolved(node, None, depth);
        }
    }

    fn complete_resolved(&mut self, node: Arc<TaskNode>, branch: Option<usize>, depth: usize) {
        {
            let Some(state) = self.states.get_mut(&node.id) else {
                return;
            };
            if state.status != TaskStatus::InProgress {
                debug!(task_id = %node.id, status = ?state.status, "completion ignored, task not in progress");
                return;
            }
            state.status = TaskStatus::Completed;
        }

        for action in &node.on_complete {
            action.execute(self.systems.as_mut());
        }
        info!(task_id = %node.id, name = %node.name, "task completed");
        self.emit(TaskEvent::Completed {
            task_id: node.id.clone(),
        });

        let successor = match branch.and_then(|index| node.branches.get(index)) {
            Some(taken) => {
                self.apply_branch(&node.id, taken);
                taken.next_task.clone()
            }
            None => node.default_next_task.clone(),
        };

        match successor {
            Some(next_id) => match self.catalog.get(&next_id).cloned() {
                Some(next_node) => {
                    if depth >= MAX_CHAIN_DEPTH {
                        error!(
                            task_id = %node.id,
                            successor = %next_id,
                            cap = MAX_CHAIN_DEPTH,
                            "successor chain depth cap reached, chain stopped"
                        );
                        self.vacate_active_if(&node.id);
                    } else {
                        self.start_resolved(next_node, depth + 1);
                    }
                }
                None => {
                    debug!(task_id = %node.id, successor = %next_id, "successor not in catalog, chain ends");
                    self.vacate_active_if(&node.id);
                }
            },
            None => self.vacate_active_if(&node.id),
        }
    }

    fn apply_branch(&mut self, task_id: &str, branch: &TaskBranch) {
        info!(task_id, label = %branch.label, "branch taken");
        for impact in &branch.stat_impacts {
            self.systems.apply_stat_delta(&impact.stat, impact.delta);
        }
        for action in &branch.actions {
            action.execute(self.systems.as_mut());
        }
    }

    fn vacate_active_if(&mut self, task_id: &str) {
        if self.active.as_deref() == Some(task_id) {
            self.active = None;
        }
    }

    fn emit(&mut self, event: TaskEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }
}
